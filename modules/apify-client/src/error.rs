use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApifyError>;

/// Body of a failed API response. Apify usually answers with JSON
/// (`{"error": {"type": ..., "message": ...}}`) but proxies and gateways
/// can hand back plain text, so both shapes are kept.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(serde_json::Value),
    Text(String),
}

impl ErrorBody {
    pub fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(text),
        }
    }

    /// The `error.message` field of an Apify error payload, if there is one.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorBody::Json(value) => value.pointer("/error/message").and_then(|m| m.as_str()),
            ErrorBody::Text(_) => None,
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorBody::Json(value) => write!(f, "{value}"),
            ErrorBody::Text(text) => write!(f, "{text}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: ErrorBody },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApifyError::Timeout(err.to_string())
        } else if err.is_decode() {
            ApifyError::Parse(err.to_string())
        } else {
            ApifyError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApifyError {
    fn from(err: serde_json::Error) -> Self {
        ApifyError::Parse(err.to_string())
    }
}
