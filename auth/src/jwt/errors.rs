use thiserror::Error;

/// Error type for token codec operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature mismatch")]
    SignatureMismatch,

    #[error("Token is expired")]
    Expired,
}
