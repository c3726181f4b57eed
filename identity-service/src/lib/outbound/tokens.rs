use auth::TokenConfig;
use auth::TokenType;

use crate::domain::user::models::TokenKind;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::TokenIssuer;
use crate::user::errors::InfrastructureError;
use crate::user::errors::UserError;

/// JWT adapter for the [`TokenIssuer`] port.
pub struct JwtTokenIssuer {
    issuer: auth::TokenIssuer,
}

impl JwtTokenIssuer {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            issuer: auth::TokenIssuer::new(config),
        }
    }

    /// Access token lifetime in seconds, as reported to clients.
    pub fn access_ttl_seconds(&self) -> i64 {
        self.issuer.config().access_ttl.num_seconds()
    }
}

impl From<TokenKind> for TokenType {
    fn from(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Access => TokenType::Access,
            TokenKind::Refresh => TokenType::Refresh,
        }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn sign(&self, subject: &UserId, kind: TokenKind) -> Result<String, InfrastructureError> {
        self.issuer
            .issue(subject, kind.into())
            .map_err(|e| InfrastructureError::SigningFailure(e.to_string()))
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<UserId, UserError> {
        let claims = self
            .issuer
            .verify_as(token, kind.into())
            .map_err(|e| UserError::InvalidToken(e.to_string()))?;

        UserId::from_string(&claims.sub).map_err(|e| UserError::InvalidToken(e.to_string()))
    }
}
