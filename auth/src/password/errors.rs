use thiserror::Error;

/// Error type for password operations.
///
/// Only hashing can fail; verification is total and reports its outcome as a
/// plain boolean.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
