//! Shared error type across parley crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, ParleyError>;

/// Unified error type used by core and gateway.
///
/// None of these are ever sent to a client: the protocol has no error
/// channel, so callers log them and carry on.
#[derive(Debug, Error)]
pub enum ParleyError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("recipient offline: {0}")]
    RecipientOffline(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ParleyError {
    /// Stable label used in logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ParleyError::BadRequest(_) => "bad_request",
            ParleyError::RecipientOffline(_) => "recipient_offline",
            ParleyError::UnsupportedVersion => "unsupported_version",
            ParleyError::Internal(_) => "internal",
        }
    }

    /// Errors that are expected during normal operation and only worth a debug line.
    pub fn is_silent(&self) -> bool {
        matches!(self, ParleyError::RecipientOffline(_) | ParleyError::BadRequest(_))
    }
}
