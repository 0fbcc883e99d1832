//! Backend base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated chat backend base URL.
///
/// Backend URLs must use HTTPS (or HTTP for localhost, to allow local
/// development and mock-server tests). API paths are joined under the
/// backend's `/api/` prefix.
///
/// # Example
///
/// ```
/// use confab_core::BackendUrl;
///
/// let backend = BackendUrl::new("https://chat.example.com").unwrap();
/// assert_eq!(backend.api_url("conversations"),
///            "https://chat.example.com/api/conversations");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BackendUrl(Url);

impl BackendUrl {
    /// Create a new backend URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::BackendUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path() == "/" {
            let mut u = url.clone();
            u.set_path("");
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Returns the API endpoint URL for a given backend-relative path.
    pub fn api_url(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths,
        // so trim before joining
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/api/{}", base, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    /// Returns the URL scheme.
    pub fn scheme(&self) -> &str {
        self.0.scheme()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::BackendUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::BackendUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::BackendUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for BackendUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BackendUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for BackendUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for BackendUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BackendUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for BackendUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let backend = BackendUrl::new("https://chat.example.com").unwrap();
        assert_eq!(backend.host(), Some("chat.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let backend = BackendUrl::new("http://localhost:5000").unwrap();
        assert_eq!(backend.host(), Some("localhost"));
    }

    #[test]
    fn api_url_construction() {
        let backend = BackendUrl::new("https://chat.example.com").unwrap();
        assert_eq!(
            backend.api_url("conversations"),
            "https://chat.example.com/api/conversations"
        );
    }

    #[test]
    fn normalizes_trailing_slash_in_api_url() {
        let backend = BackendUrl::new("https://chat.example.com/").unwrap();
        assert_eq!(
            backend.api_url("refresh"),
            "https://chat.example.com/api/refresh"
        );
    }

    #[test]
    fn api_url_with_nested_path() {
        let backend = BackendUrl::new("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            backend.api_url("conversations/7/history"),
            "http://127.0.0.1:5000/api/conversations/7/history"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(BackendUrl::new("http://chat.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(BackendUrl::new("/api/chat").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let backend = BackendUrl::new("https://chat.example.com").unwrap();
        let json = serde_json::to_string(&backend).unwrap();
        let parsed: BackendUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, backend);
    }
}
