//! Credential and token primitives.
//!
//! - Password hashing (Argon2id, PHC strings)
//! - Bearer token signing and verification (HS256 JWT)
//!
//! Services wrap these behind their own ports; nothing here knows about
//! users or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{TokenConfig, TokenIssuer, TokenType};
//!
//! let issuer = TokenIssuer::new(TokenConfig::new(
//!     "secret_key_at_least_32_bytes_long!",
//!     "identity-service",
//! ));
//! let token = issuer.issue("user123", TokenType::Access).unwrap();
//! let claims = issuer.verify_as(&token, TokenType::Access).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenConfig;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenType;
