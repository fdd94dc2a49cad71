//! Profile Gateway Port - single-row lookup against the remote profile table.
//!
//! The gateway reports what the backend said (`data`, `error`, `status`)
//! without interpreting it. [`GatewayResponse::classify`] turns that into
//! absence, failure or success. Absence is an expected state for new users
//! and must never be reported as a failure.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::CurrentUser;
use crate::domain::profile::ProfileFields;

/// HTTP status some backends use for "single-row query matched zero rows".
pub const NOT_ACCEPTABLE_STATUS: u16 = 406;

/// PostgREST error code for "JSON object requested, multiple (or no) rows returned".
pub const ROW_NOT_FOUND_CODE: &str = "PGRST116";

const ROW_NOT_FOUND_PHRASE: &str = "row not found";

/// Structured error reported by the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct GatewayError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: None,
            hint: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// True when the backend is saying "there is no such row".
    pub fn is_row_not_found(&self) -> bool {
        self.code.as_deref() == Some(ROW_NOT_FOUND_CODE)
            || self.message.to_lowercase().contains(ROW_NOT_FOUND_PHRASE)
    }
}

/// Raw answer of a single-row query.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayResponse {
    pub data: Option<ProfileFields>,
    pub error: Option<GatewayError>,
    /// HTTP status, or 0 when the request never got a response.
    pub status: u16,
}

impl GatewayResponse {
    pub fn found(data: ProfileFields) -> Self {
        Self {
            data: Some(data),
            error: None,
            status: 200,
        }
    }

    pub fn failed(status: u16, error: GatewayError) -> Self {
        Self {
            data: None,
            error: Some(error),
            status,
        }
    }

    /// Zero-row answer as PostgREST sends it in single-object mode.
    pub fn no_rows() -> Self {
        Self::failed(
            NOT_ACCEPTABLE_STATUS,
            GatewayError::new("JSON object requested, multiple (or no) rows returned")
                .with_code(ROW_NOT_FOUND_CODE)
                .with_details("The result contains 0 rows"),
        )
    }

    /// Classifies the answer. Rules are checked in order:
    ///
    /// 1. status 406 is absence
    /// 2. a row-not-found error (by code or message) is absence
    /// 3. any other error is a failure
    /// 4. otherwise the data is the row; no data at all is absence
    pub fn classify(self) -> FetchOutcome {
        if self.status == NOT_ACCEPTABLE_STATUS {
            return FetchOutcome::Absent;
        }
        match (self.error, self.data) {
            (Some(error), _) if error.is_row_not_found() => FetchOutcome::Absent,
            (Some(error), _) => FetchOutcome::Failed(error),
            (None, Some(data)) => FetchOutcome::Found(data),
            (None, None) => FetchOutcome::Absent,
        }
    }
}

/// Three-way result of a profile lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Found(ProfileFields),
    Absent,
    Failed(GatewayError),
}

/// Port for reading one profile row by user id.
///
/// Implementations never panic and never return `Err`: transport problems
/// are reported as a `GatewayResponse` with an error and status 0.
#[async_trait]
pub trait ProfileGateway: Send + Sync {
    /// Fetch the row whose `id` equals `user.id`.
    ///
    /// The full user is passed so implementations can sign the request
    /// with the session token.
    async fn fetch_by_id(&self, user: &CurrentUser) -> GatewayResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> ProfileFields {
        ProfileFields::new().with("id", "u1").with("bio", "hello")
    }

    #[test]
    fn status_406_is_absence_even_with_unrelated_error() {
        let response = GatewayResponse::failed(406, GatewayError::new("Not Acceptable"));
        assert_eq!(response.classify(), FetchOutcome::Absent);
    }

    #[test]
    fn status_406_without_error_is_absence() {
        let response = GatewayResponse {
            data: None,
            error: None,
            status: 406,
        };
        assert_eq!(response.classify(), FetchOutcome::Absent);
    }

    #[test]
    fn row_not_found_code_is_absence() {
        let error = GatewayError::new("anything").with_code(ROW_NOT_FOUND_CODE);
        let response = GatewayResponse::failed(400, error);
        assert_eq!(response.classify(), FetchOutcome::Absent);
    }

    #[test]
    fn row_not_found_message_is_absence_case_insensitively() {
        let response = GatewayResponse::failed(404, GatewayError::new("Row Not Found for id"));
        assert_eq!(response.classify(), FetchOutcome::Absent);
    }

    #[test]
    fn other_errors_are_failures() {
        let error = GatewayError::new("permission denied for table profiles").with_code("42501");
        let response = GatewayResponse::failed(401, error.clone());
        assert_eq!(response.classify(), FetchOutcome::Failed(error));
    }

    #[test]
    fn transport_error_is_failure() {
        let response = GatewayResponse::failed(0, GatewayError::new("connection refused"));
        assert!(matches!(response.classify(), FetchOutcome::Failed(_)));
    }

    #[test]
    fn data_without_error_is_success() {
        assert_eq!(
            GatewayResponse::found(row()).classify(),
            FetchOutcome::Found(row())
        );
    }

    #[test]
    fn no_data_and_no_error_is_absence() {
        let response = GatewayResponse {
            data: None,
            error: None,
            status: 200,
        };
        assert_eq!(response.classify(), FetchOutcome::Absent);
    }

    #[test]
    fn no_rows_helper_classifies_as_absence() {
        assert_eq!(GatewayResponse::no_rows().classify(), FetchOutcome::Absent);
    }

    #[test]
    fn gateway_error_deserializes_postgrest_body() {
        let body = r#"{"code":"PGRST116","details":"The result contains 0 rows","hint":null,"message":"JSON object requested, multiple (or no) rows returned"}"#;
        let error: GatewayError = serde_json::from_str(body).unwrap();

        assert_eq!(error.code.as_deref(), Some("PGRST116"));
        assert!(error.hint.is_none());
        assert!(error.is_row_not_found());
    }

    #[test]
    fn gateway_trait_is_object_safe_and_send_sync() {
        fn _assert_trait_object(_: &dyn ProfileGateway) {}
        fn _assert_arc_send_sync<T: Send + Sync + ?Sized>() {}
        _assert_arc_send_sync::<std::sync::Arc<dyn ProfileGateway>>();
    }
}
