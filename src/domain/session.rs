use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{RatReaderError, RatReaderResult};

/// Persisted client state: the API endpoint and the credentials of the last
/// successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Session {
    /// The bearer token, if one is stored and non-empty
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_logged_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store a validated API URL without its trailing slash, returning the
    /// stored value.
    pub fn set_api_url(&mut self, url: &str) -> RatReaderResult<String> {
        let normalized = normalize_api_url(url)?;
        self.api_url = Some(normalized.clone());
        Ok(normalized)
    }

    pub fn sign_in(&mut self, token: String, username: String) {
        self.token = Some(token);
        self.username = Some(username);
    }

    pub fn sign_out(&mut self) {
        self.token = None;
        self.username = None;
    }
}

/// Trim whitespace and trailing slashes, then check the result is an
/// http(s) URL.
pub fn normalize_api_url(url: &str) -> RatReaderResult<String> {
    let trimmed = url.trim().trim_end_matches('/');

    let parsed = Url::parse(trimmed)
        .map_err(|e| RatReaderError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(RatReaderError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            trimmed
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_trailing_slashes() {
        assert_eq!(
            normalize_api_url("https://example.com/ratReader/api.php/").unwrap(),
            "https://example.com/ratReader/api.php"
        );
        assert_eq!(
            normalize_api_url("  http://localhost:8080// ").unwrap(),
            "http://localhost:8080"
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(
            normalize_api_url("not a url"),
            Err(RatReaderError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_api_url("ftp://example.com"),
            Err(RatReaderError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_empty_token_is_not_logged_in() {
        let session = Session {
            token: Some(String::new()),
            ..Session::default()
        };

        assert!(!session.is_logged_in());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_sign_out_keeps_api_url() {
        let mut session = Session {
            api_url: Some("https://example.com/api.php".to_string()),
            token: Some("abc".to_string()),
            username: Some("alice".to_string()),
        };

        session.sign_out();

        assert_eq!(session.api_url.as_deref(), Some("https://example.com/api.php"));
        assert!(session.token.is_none());
        assert!(session.username.is_none());
    }

    #[test]
    fn test_absent_fields_are_not_serialized() {
        let session = Session {
            api_url: Some("https://example.com".to_string()),
            ..Session::default()
        };

        let json = serde_json::to_string(&session).unwrap();
        assert_eq!(json, r#"{"api_url":"https://example.com"}"#);
    }
}
