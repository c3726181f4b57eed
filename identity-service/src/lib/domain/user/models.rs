use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

/// Registered principal as held by the user store.
///
/// Only ever carries the password hash; plaintext is dropped before a record
/// is built (see [`UserDraft`](crate::user::factory::UserDraft)).
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// A validated user that has not been persisted yet.
///
/// Has no id: the store assigns one on insert.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Syntactic check only: the address must contain an `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidEmail` - Address has no `@`
    pub fn new(email: String) -> Result<Self, ValidationError> {
        if email.contains('@') {
            Ok(Self(email))
        } else {
            Err(ValidationError::InvalidEmail(email))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password that passed the strength check.
///
/// Never printed; `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;

    /// Create a new validated password.
    ///
    /// Length is counted in characters, not bytes.
    ///
    /// # Errors
    /// * `WeakPassword` - Shorter than [`Password::MIN_LENGTH`]
    pub fn new(password: String) -> Result<Self, ValidationError> {
        let actual = password.chars().count();
        if actual < Self::MIN_LENGTH {
            return Err(ValidationError::WeakPassword {
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// Raw registration input, as received from the caller.
#[derive(Clone)]
pub struct RegisterCommand {
    pub email: String,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for RegisterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Raw login input.
///
/// The password is not strength-checked: a short wrong password must fail
/// as bad credentials, not as a validation error.
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: String, password: String) -> Self {
        Self { email, password }
    }
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Purpose of an issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Short-lived, presented on every authenticated request
    Access,
    /// Long-lived, exchanged for a new pair
    Refresh,
}

/// Tokens returned by a successful login or refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_requires_at_sign() {
        assert!(EmailAddress::new("a@b.com".to_string()).is_ok());
        assert!(EmailAddress::new("@".to_string()).is_ok());

        for invalid in ["", "a.b.com", "plainaddress", "user at example.com"] {
            assert_eq!(
                EmailAddress::new(invalid.to_string()),
                Err(ValidationError::InvalidEmail(invalid.to_string()))
            );
        }
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(Password::new("secret".to_string()).is_ok());
        assert!(Password::new("secret1".to_string()).is_ok());

        assert_eq!(
            Password::new("wrong".to_string()),
            Err(ValidationError::WeakPassword { min: 6, actual: 5 })
        );
        assert_eq!(
            Password::new(String::new()),
            Err(ValidationError::WeakPassword { min: 6, actual: 0 })
        );
    }

    #[test]
    fn test_password_length_counts_characters() {
        // 5 characters, 10 bytes
        assert!(matches!(
            Password::new("ééééé".to_string()),
            Err(ValidationError::WeakPassword { actual: 5, .. })
        ));
        assert!(Password::new("éééééé".to_string()).is_ok());
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let password = Password::new("secret1".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("secret1"));

        let command = LoginCommand::new("a@b.com".to_string(), "secret1".to_string());
        let debug = format!("{:?}", command);
        assert!(debug.contains("a@b.com"));
        assert!(!debug.contains("secret1"));

        let user = User {
            id: UserId::new(),
            email: EmailAddress::new("a@b.com".to_string()).unwrap(),
            password_hash: "$argon2id$hash".to_string(),
            refresh_token: Some("refresh".to_string()),
            created_at: Utc::now(),
        };
        let debug = format!("{:?}", user);
        assert!(!debug.contains("$argon2id$hash"));
        assert!(!debug.contains("\"refresh\""));
    }

    #[test]
    fn test_user_id_round_trip() {
        let id = UserId::new();
        assert_eq!(UserId::from_string(&id.to_string()), Ok(id));
        assert!(UserId::from_string("not-a-uuid").is_err());
    }
}
