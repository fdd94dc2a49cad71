//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// User identifier (issued by the auth provider, stable for the account).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_accepts_non_empty_string() {
        let id = UserId::new("user-123").unwrap();
        assert_eq!(id.as_str(), "user-123");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        let result = UserId::new("");
        assert!(matches!(result, Err(ValidationError::EmptyField { .. })));
    }

    #[test]
    fn user_id_rejects_whitespace_only() {
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_displays_correctly() {
        let id = UserId::new("user-456").unwrap();
        assert_eq!(format!("{}", id), "user-456");
    }

    #[test]
    fn user_id_serializes_as_plain_string() {
        let id = UserId::new("u1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"u1\"");
    }

    #[test]
    fn user_id_deserialization_rejects_empty() {
        let result: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
