//! PostgREST Gateway - Implementation of ProfileGateway for a hosted
//! Postgres REST endpoint (the `/rest/v1` API of a Supabase project).
//!
//! # Configuration
//!
//! ```ignore
//! let config = PostgrestConfig::new("https://abc.supabase.co", anon_key)
//!     .with_table("profiles")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let gateway = PostgrestProfileGateway::new(config)?;
//! ```
//!
//! # Single-row mode
//!
//! Requests carry `Accept: application/vnd.pgrst.object+json`, so the
//! server answers with a bare object for one row and with 406 / `PGRST116`
//! for zero rows. Interpreting that is left to `GatewayResponse::classify`.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::domain::foundation::CurrentUser;
use crate::domain::profile::ProfileFields;
use crate::ports::{GatewayError, GatewayResponse, ProfileGateway};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Configuration for the PostgREST gateway.
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Project URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,
    /// Publishable (anon) key, sent as `apikey` on every request.
    anon_key: Secret<String>,
    /// Table holding one row per user.
    pub table: String,
    /// Request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl PostgrestConfig {
    /// Creates a configuration for the `profiles` table with no timeout.
    pub fn new(base_url: impl Into<String>, anon_key: Secret<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key,
            table: "profiles".to_string(),
            timeout: None,
        }
    }

    /// Sets the table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn anon_key(&self) -> &str {
        self.anon_key.expose_secret()
    }
}

/// Remote profile table reached over PostgREST.
pub struct PostgrestProfileGateway {
    config: PostgrestConfig,
    client: Client,
}

impl PostgrestProfileGateway {
    /// Creates a gateway with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError` if the HTTP client cannot be constructed.
    pub fn new(config: PostgrestConfig) -> Result<Self, GatewayError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GatewayError::new(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the table endpoint URL.
    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    /// Turns a non-2xx body into a structured error.
    fn error_from_body(status: StatusCode, body: &str) -> GatewayError {
        let fallback = || status.canonical_reason().unwrap_or("Request failed").to_string();

        match serde_json::from_str::<GatewayError>(body) {
            Ok(mut error) => {
                if error.message.is_empty() {
                    error.message = fallback();
                }
                error
            }
            Err(_) => GatewayError::new(fallback()),
        }
    }
}

#[async_trait]
impl ProfileGateway for PostgrestProfileGateway {
    async fn fetch_by_id(&self, user: &CurrentUser) -> GatewayResponse {
        let bearer = user.access_token().unwrap_or_else(|| self.config.anon_key());

        tracing::debug!(user_id = %user.id, table = %self.config.table, "Fetching profile row");

        let result = self
            .client
            .get(self.table_url())
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", user.id))])
            .header("apikey", self.config.anon_key())
            .header(AUTHORIZATION, format!("Bearer {}", bearer))
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let message = if e.is_timeout() {
                    format!("Request timed out: {}", e)
                } else if e.is_connect() {
                    format!("Connection failed: {}", e)
                } else {
                    e.to_string()
                };
                return GatewayResponse::failed(0, GatewayError::new(message));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return GatewayResponse::failed(
                    status.as_u16(),
                    GatewayError::new(format!("Failed to read response body: {}", e)),
                )
            }
        };

        tracing::debug!(status = status.as_u16(), "Profile row response received");

        if !status.is_success() {
            return GatewayResponse::failed(status.as_u16(), Self::error_from_body(status, &body));
        }

        match ProfileFields::from_json_str(&body) {
            Ok(data) => GatewayResponse {
                data: Some(data),
                error: None,
                status: status.as_u16(),
            },
            Err(e) => GatewayResponse::failed(
                status.as_u16(),
                GatewayError::new(format!("Unexpected response body: {}", e)),
            ),
        }
    }
}
