use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Rejected registration input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Password too short: minimum {min} characters, got {actual}")]
    WeakPassword { min: usize, actual: usize },
}

/// Unexpected failures in a collaborator.
///
/// Logged with full detail; callers only ever see a generic failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InfrastructureError {
    #[error("User store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Token signing failed: {0}")]
    SigningFailure(String),

    #[error("Password hashing failed: {0}")]
    HashingFailure(String),
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User already registered: {0}")]
    AlreadyRegistered(String),

    // Kept apart from InvalidCredentials for logging; the HTTP layer merges them.
    #[error("No user registered with email: {0}")]
    NoSuchUser(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),
}
