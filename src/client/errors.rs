//! Error types for talking to the compiler service
//!
//! [`ClientError`] covers the structural failures of one request: the source was
//! rejected before sending, the transport failed, or the reply was not a usable
//! envelope. A service-reported compile failure is *not* an error here; it comes
//! back as a [`CompileResult`](super::CompileResult) with `success == false`.

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Failures of a single request to the compiler service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The source was empty or whitespace-only; nothing was sent
    #[error("source is empty")]
    Validation,

    /// Transport failure or unreadable body
    #[error("network error: {0}")]
    Network(String),

    /// Non-success status without a usable body; reported like a network failure
    #[error("server responded with status {0}")]
    Status(u16),

    /// The body did not parse as the expected envelope, or a field failed normalization
    #[error("protocol error: {0}")]
    Protocol(String),
}

impl ClientError {
    /// Network and protocol failures abort rendering for the whole action
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ClientError::Network(_) | ClientError::Status(_) | ClientError::Protocol(_)
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(value: serde_json::Error) -> Self {
        ClientError::Protocol(value.to_string())
    }
}
