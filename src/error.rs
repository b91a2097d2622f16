//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl SdkError {
    /// The server-provided `{"error": ...}` message, if this error carries one.
    pub fn api_message(&self) -> Option<String> {
        match self {
            SdkError::Http(e) => e.api_message(),
            _ => None,
        }
    }

    /// Whether the backend reported the requested entity as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SdkError::Http(HttpError::NotFound(_)))
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Malformed response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl HttpError {
    /// Extract the backend's `{"error": "..."}` message from an error body.
    pub fn api_message(&self) -> Option<String> {
        let body = match self {
            HttpError::ServerError { body, .. } => body,
            HttpError::Unauthorized(body) => body,
            HttpError::NotFound(body) => body,
            HttpError::BadRequest(body) => body,
            _ => return None,
        };
        error_field(body)
    }
}

fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("error")? {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()),
        _ => None,
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,
}
