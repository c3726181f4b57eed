use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::factory;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenKind;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialHasher;
use crate::user::ports::TokenIssuer;
use crate::user::ports::UserRepository;

/// Domain service implementing the authentication use cases.
///
/// Collaborators are injected at construction; the service holds no state of
/// its own.
pub struct AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    token_issuer: Arc<TI>,
}

impl<UR, CH, TI> AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Password hashing implementation
    /// * `token_issuer` - Token signing implementation
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>, token_issuer: Arc<TI>) -> Self {
        Self {
            repository,
            hasher,
            token_issuer,
        }
    }

    fn issue_pair(&self, id: &UserId) -> Result<TokenPair, UserError> {
        Ok(TokenPair {
            access_token: self.token_issuer.sign(id, TokenKind::Access)?,
            refresh_token: self.token_issuer.sign(id, TokenKind::Refresh)?,
        })
    }
}

#[async_trait]
impl<UR, CH, TI> AuthServicePort for AuthService<UR, CH, TI>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TI: TokenIssuer,
{
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!(email = %command.email, "Registration for existing email rejected");
            return Err(UserError::AlreadyRegistered(command.email));
        }

        let draft = factory::create_user(command.email, command.password)?;

        let password_hash = self.hasher.hash(draft.password()).await?;
        let user = self
            .repository
            .save(draft.with_password_hash(password_hash))
            .await?;

        tracing::info!(user_id = %user.id, email = %user.email, "User registered");

        Ok(user)
    }

    async fn authenticate(&self, command: LoginCommand) -> Result<TokenPair, UserError> {
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::info!(email = %command.email, "Login for unknown email");
            return Err(UserError::NoSuchUser(command.email));
        };

        if !self
            .hasher
            .verify(&command.password, &user.password_hash)
            .await?
        {
            tracing::warn!(user_id = %user.id, "Login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        let tokens = self.issue_pair(&user.id)?;
        self.repository
            .save_refresh_token(&user.id, &tokens.refresh_token)
            .await?;

        tracing::info!(user_id = %user.id, "User authenticated");

        Ok(tokens)
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError> {
        let subject = self.token_issuer.verify(refresh_token, TokenKind::Refresh)?;

        let holder = self
            .repository
            .find_by_refresh_token(refresh_token)
            .await?
            .filter(|user| user.id == subject);

        let Some(user) = holder else {
            tracing::warn!(user_id = %subject, "Refresh with a token that is no longer active");
            return Err(UserError::InvalidToken(
                "refresh token is no longer active".to_string(),
            ));
        };

        let tokens = self.issue_pair(&user.id)?;
        self.repository
            .save_refresh_token(&user.id, &tokens.refresh_token)
            .await?;

        tracing::debug!(user_id = %user.id, "Token pair rotated");

        Ok(tokens)
    }

    async fn current_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| UserError::NoSuchUser(id.to_string()))
    }

    fn verify_access_token(&self, token: &str) -> Result<UserId, UserError> {
        self.token_issuer.verify(token, TokenKind::Access)
    }
}
