//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Stable chat-channel address of a user (the WhatsApp phone number).
///
/// Assigned at first contact and never changes for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty.
    ///
    /// Surrounding whitespace is stripped.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(trimmed.to_string()))
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

impl FromStr for UserId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_trims_whitespace() {
        let id = UserId::new(" 5567999990000 ").unwrap();
        assert_eq!(id.as_str(), "5567999990000");
    }

    #[test]
    fn user_id_parses_from_str() {
        let id: UserId = "5567999990000".parse().unwrap();
        assert_eq!(id.to_string(), "5567999990000");
    }

    #[test]
    fn user_id_serializes_transparently() {
        let id = UserId::new("5567999990000").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"5567999990000\"");
    }
}
