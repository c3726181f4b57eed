pub mod claims;
pub mod config;
pub mod errors;
pub mod issuer;

pub use claims::Claims;
pub use claims::TokenType;
pub use config::TokenConfig;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
