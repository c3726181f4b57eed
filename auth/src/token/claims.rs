use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Purpose a token was issued for.
///
/// Serialized into the `typ` claim so an access token can never be
/// presented where a refresh token is expected, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::Access => f.write_str("access"),
            TokenType::Refresh => f.write_str("refresh"),
        }
    }
}

/// Registered JWT claims carried by every token this crate issues.
///
/// `iat` and `exp` are stamped by [`TokenIssuer::sign`](crate::TokenIssuer::sign);
/// a freshly built value carries zeros until then.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Issuer
    pub iss: String,

    /// JWT ID, unique per token
    pub jti: String,

    /// Token purpose
    pub typ: TokenType,
}

impl Claims {
    /// Create unsigned claims for a subject.
    pub fn new(subject: impl ToString, token_type: TokenType, issuer: impl ToString) -> Self {
        Self {
            sub: subject.to_string(),
            exp: 0,
            iat: 0,
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            typ: token_type,
        }
    }
}
