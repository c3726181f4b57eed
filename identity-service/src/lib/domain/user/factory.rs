use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::ValidationError;
use crate::user::models::EmailAddress;
use crate::user::models::NewUser;
use crate::user::models::Password;

/// Validated registration input waiting for its password hash.
///
/// The only type that holds both the email and the plaintext password.
/// [`with_password_hash`](Self::with_password_hash) consumes it, so the
/// plaintext cannot outlive record construction.
pub struct UserDraft {
    email: EmailAddress,
    password: Password,
    created_at: DateTime<Utc>,
}

impl UserDraft {
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Attach the hash computed from [`password`](Self::password) and drop the plaintext.
    pub fn with_password_hash(self, password_hash: String) -> NewUser {
        NewUser {
            email: self.email,
            password_hash,
            created_at: self.created_at,
        }
    }
}

impl fmt::Debug for UserDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserDraft")
            .field("email", &self.email)
            .field("password", &self.password)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Validate raw registration input.
///
/// Email is checked before the password; either failure aborts without
/// building anything. `created_at` is stamped here.
///
/// # Errors
/// * `InvalidEmail` - Email has no `@`
/// * `WeakPassword` - Password shorter than [`Password::MIN_LENGTH`]
pub fn create_user(email: String, password: String) -> Result<UserDraft, ValidationError> {
    let email = EmailAddress::new(email)?;
    let password = Password::new(password)?;

    Ok(UserDraft {
        email,
        password,
        created_at: Utc::now(),
    })
}
