//! Sink error types.
//!
//! Delivery failures are never propagated into the game: the session
//! controller logs them and folds them into a transient status message.
//! The taxonomy still matters for logging and tests.

use thiserror::Error;

/// Errors that can occur while delivering a results payload.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The endpoint rejected the payload.
    #[error("delivery rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint returned something that is not a `{success, message}`
    /// object.
    #[error("malformed response: {0}")]
    InvalidResponse(String),

    /// Writing a locally rendered page failed.
    #[error("failed to write results page: {0}")]
    Io(#[from] std::io::Error),
}
