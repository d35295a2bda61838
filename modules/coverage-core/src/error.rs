use apify_client::{ApifyError, ErrorBody};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoverageError>;

#[derive(Debug, Error)]
pub enum CoverageError {
    /// Caller input is structurally invalid. Never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The search exchange did not complete. `status` is `None` when no HTTP
    /// response was received (network failure, timeout, unreadable body).
    #[error("Transport error: {}", describe_transport(.status, .body))]
    Transport {
        status: Option<u16>,
        body: ErrorBody,
    },
}

impl CoverageError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoverageError::Validation(msg.into())
    }
}

fn describe_transport(status: &Option<u16>, body: &ErrorBody) -> String {
    match status {
        Some(code) => format!("status {code}: {body}"),
        None => body.to_string(),
    }
}

impl From<ApifyError> for CoverageError {
    fn from(err: ApifyError) -> Self {
        match err {
            ApifyError::Api { status, body } => CoverageError::Transport {
                status: Some(status),
                body,
            },
            other => CoverageError::Transport {
                status: None,
                body: ErrorBody::Text(other.to_string()),
            },
        }
    }
}
