//! Conversation identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// An opaque conversation identifier.
///
/// The backend assigns these; this client never inspects their structure.
/// Because ids are embedded in URL paths, construction rejects values that
/// would change the path shape.
///
/// The backend is observed emitting ids as JSON numbers in some responses
/// and strings in others, so deserialization accepts both and normalizes to
/// the string form.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ConversationId(String);

impl ConversationId {
    /// Create a new conversation id, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is empty or contains characters that are
    /// unsafe inside a URL path segment.
    pub fn new(s: impl Into<String>) -> Result<Self, Error> {
        let s = s.into();

        if s.is_empty() {
            return Err(InvalidInputError::ConversationId {
                value: s,
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if s.contains(['/', '?', '#']) || s.chars().any(char::is_whitespace) {
            return Err(InvalidInputError::ConversationId {
                value: s,
                reason: "must not contain path separators or whitespace".to_string(),
            }
            .into());
        }

        Ok(Self(s))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConversationId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ConversationId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ConversationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        let raw = match value {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected string or number conversation id, got {}",
                    other
                )));
            }
        };
        ConversationId::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_strings() {
        let id = ConversationId::new("42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn rejects_empty() {
        assert!(ConversationId::new("").is_err());
    }

    #[test]
    fn rejects_path_separators() {
        assert!(ConversationId::new("1/history").is_err());
        assert!(ConversationId::new("1?x=2").is_err());
        assert!(ConversationId::new("1 2").is_err());
    }

    #[test]
    fn deserializes_from_number() {
        let id: ConversationId = serde_json::from_str("42").unwrap();
        assert_eq!(id.as_str(), "42");
    }

    #[test]
    fn deserializes_from_string() {
        let id: ConversationId = serde_json::from_str("\"abc-123\"").unwrap();
        assert_eq!(id.as_str(), "abc-123");
    }

    #[test]
    fn serializes_as_string() {
        let id = ConversationId::new("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
