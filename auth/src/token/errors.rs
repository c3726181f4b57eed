use thiserror::Error;

use super::claims::TokenType;

/// Error type for token signing and verification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Failed to decode token: {0}")]
    DecodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is missing the `{0}` claim")]
    MissingClaim(String),

    #[error("Expected a {expected} token, got a {actual} token")]
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },
}
