use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::claims::TokenType;
use super::config::TokenConfig;
use super::errors::TokenError;

/// Signs and verifies HS256 bearer tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: TokenConfig,
}

impl TokenIssuer {
    const ALGORITHM: Algorithm = Algorithm::HS256;

    /// Create an issuer from explicit configuration.
    pub fn new(config: TokenConfig) -> Self {
        let mut validation = Validation::new(Self::ALGORITHM);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            config,
        }
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Sign claims with an explicit lifetime.
    ///
    /// `iat` is set to now and `exp` to now + `ttl`; any values already on
    /// `claims` are overwritten.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn sign(&self, claims: &Claims, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let stamped = Claims {
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            ..claims.clone()
        };

        encode(&Header::new(Self::ALGORITHM), &stamped, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Issue a token for `subject` using the configured lifetime for `token_type`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(
        &self,
        subject: impl ToString,
        token_type: TokenType,
    ) -> Result<String, TokenError> {
        let claims = Claims::new(subject, token_type, &self.config.issuer);
        self.sign(&claims, self.config.ttl_for(token_type))
    }

    /// Verify signature, issuer and expiry, and return the claims.
    ///
    /// # Errors
    /// * `Expired` - `exp` is in the past
    /// * `MissingClaim` - `exp`, `sub` or `iss` is absent
    /// * `DecodingFailed` - Signature, issuer or format is invalid
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::MissingRequiredClaim(claim) => TokenError::MissingClaim(claim.clone()),
                _ => TokenError::DecodingFailed(e.to_string()),
            })
    }

    /// Verify a token and require it to be of `expected` type.
    ///
    /// # Errors
    /// * `WrongType` - Token is valid but was issued for another purpose
    /// * Any error from [`verify`](Self::verify)
    pub fn verify_as(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let claims = self.verify(token)?;

        if claims.typ != expected {
            return Err(TokenError::WrongType {
                expected,
                actual: claims.typ,
            });
        }

        Ok(claims)
    }
}
