use async_trait::async_trait;
use auth::PasswordHasher;

use crate::domain::user::models::Password;
use crate::domain::user::ports::CredentialHasher;
use crate::user::errors::InfrastructureError;

/// Argon2id adapter for the [`CredentialHasher`] port.
///
/// Hashing is CPU-bound, so both operations run on the blocking pool.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher {
    hasher: PasswordHasher,
}

impl Argon2CredentialHasher {
    pub fn new(hasher: PasswordHasher) -> Self {
        Self { hasher }
    }
}

fn hashing_error(e: impl ToString) -> InfrastructureError {
    InfrastructureError::HashingFailure(e.to_string())
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &Password) -> Result<String, InfrastructureError> {
        let hasher = self.hasher.clone();
        let plaintext = password.expose().to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(hashing_error)?
            .map_err(hashing_error)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, InfrastructureError> {
        let hasher = self.hasher.clone();
        let plaintext = password.to_owned();
        let hash = hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &hash))
            .await
            .map_err(hashing_error)?
            .map_err(hashing_error)
    }
}
