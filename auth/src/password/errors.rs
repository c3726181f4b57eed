use thiserror::Error;

/// Error type for password hashing operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Stored password hash is malformed: {0}")]
    MalformedHash(String),

    #[error("Invalid Argon2 parameters: {0}")]
    InvalidParameters(String),
}
