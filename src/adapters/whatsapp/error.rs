//! Errors of the WhatsApp Cloud API transport.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

#[derive(Debug, Error)]
pub enum MessagingError {
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("access token rejected")]
    Unauthorized,

    #[error("rate limited by the Cloud API")]
    RateLimited,

    #[error("message rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Cloud API unavailable with status {status}")]
    Unavailable { status: u16 },
}

impl MessagingError {
    /// True for failures worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            MessagingError::Timeout { .. }
                | MessagingError::Network(_)
                | MessagingError::RateLimited
                | MessagingError::Unavailable { .. }
        )
    }
}

impl From<MessagingError> for DomainError {
    fn from(err: MessagingError) -> Self {
        DomainError::new(ErrorCode::MessagingError, err.to_string())
    }
}
