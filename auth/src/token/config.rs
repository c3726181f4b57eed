use std::fmt;

use chrono::Duration;

use super::claims::TokenType;

/// Signing key, issuer and lifetimes for issued tokens.
///
/// Built once at startup and handed to [`TokenIssuer::new`](crate::TokenIssuer::new).
#[derive(Clone)]
pub struct TokenConfig {
    pub secret: Vec<u8>,
    pub issuer: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl TokenConfig {
    /// Default access token lifetime.
    pub const DEFAULT_ACCESS_TTL_MINUTES: i64 = 15;
    /// Default refresh token lifetime.
    pub const DEFAULT_REFRESH_TTL_DAYS: i64 = 7;

    /// Create a config with default lifetimes.
    ///
    /// # Arguments
    /// * `secret` - HS256 key; should be at least 32 bytes
    /// * `issuer` - Value for the `iss` claim, checked on verification
    pub fn new(secret: impl Into<Vec<u8>>, issuer: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            issuer: issuer.into(),
            access_ttl: Duration::minutes(Self::DEFAULT_ACCESS_TTL_MINUTES),
            refresh_ttl: Duration::days(Self::DEFAULT_REFRESH_TTL_DAYS),
        }
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    /// Lifetime for tokens of the given type.
    pub fn ttl_for(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        }
    }
}

// Keeps the signing key out of logs.
impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}
