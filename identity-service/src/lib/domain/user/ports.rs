use async_trait::async_trait;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::TokenKind;
use crate::domain::user::models::TokenPair;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::InfrastructureError;
use crate::user::errors::UserError;

/// Port for authentication use cases.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Raw email and plaintext password
    ///
    /// # Returns
    /// Persisted user with its assigned id
    ///
    /// # Errors
    /// * `Validation` - Email or password rejected
    /// * `AlreadyRegistered` - Email is taken
    /// * `Infrastructure` - Store or hasher failed
    async fn register(&self, command: RegisterCommand) -> Result<User, UserError>;

    /// Check credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `NoSuchUser` - No user with this email
    /// * `InvalidCredentials` - Password does not match
    /// * `Infrastructure` - Store, hasher or signer failed
    async fn authenticate(&self, command: LoginCommand) -> Result<TokenPair, UserError>;

    /// Exchange the current refresh token for a new pair.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is invalid, expired, or has been rotated
    /// * `Infrastructure` - Store or signer failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, UserError>;

    /// Retrieve the user behind a verified access token.
    ///
    /// # Errors
    /// * `NoSuchUser` - User no longer exists
    /// * `Infrastructure` - Store failed
    async fn current_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Verify an access token and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is invalid, expired, or not an access token
    fn verify_access_token(&self, token: &str) -> Result<UserId, UserError>;
}

/// Persistence operations for users.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Retrieve user by email address.
    ///
    /// # Errors
    /// * `Infrastructure` - Store failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Errors
    /// * `Infrastructure` - Store failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Insert a new user and assign its id.
    ///
    /// # Errors
    /// * `AlreadyRegistered` - Email uniqueness enforced by the store was violated
    /// * `Infrastructure` - Store failed
    async fn save(&self, user: NewUser) -> Result<User, UserError>;

    /// Replace the stored refresh token of a user.
    ///
    /// Callers have just read the user, so a missing row is a store fault.
    ///
    /// # Errors
    /// * `Infrastructure` - Store failed or no user with this id
    async fn save_refresh_token(&self, id: &UserId, token: &str) -> Result<(), UserError>;

    /// Retrieve the user currently holding a refresh token.
    ///
    /// # Errors
    /// * `Infrastructure` - Store failed
    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<User>, UserError>;
}

/// One-way hashing of plaintext passwords.
#[async_trait]
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a validated password.
    ///
    /// # Errors
    /// * `HashingFailure` - Hashing failed
    async fn hash(&self, password: &Password) -> Result<String, InfrastructureError>;

    /// Compare a plaintext password with a stored hash.
    ///
    /// # Errors
    /// * `HashingFailure` - Stored hash is unusable or verification failed to run
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, InfrastructureError>;
}

/// Signing and verification of bearer tokens.
pub trait TokenIssuer: Send + Sync + 'static {
    /// Sign a token of the given kind for a user.
    ///
    /// # Errors
    /// * `SigningFailure` - Token could not be encoded
    fn sign(&self, subject: &UserId, kind: TokenKind) -> Result<String, InfrastructureError>;

    /// Verify a token of the given kind and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, expired, wrong kind, or malformed subject
    fn verify(&self, token: &str, kind: TokenKind) -> Result<UserId, UserError>;
}
