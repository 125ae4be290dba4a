//! Authentication infrastructure library
//!
//! Provides reusable authentication building blocks for services:
//! - Password hashing with explicit per-principal salts (Argon2id)
//! - JWT token issuance and validation sharing one configuration
//!
//! Services define their own principal types and orchestration; this crate
//! only knows about passwords, salts, and signed claim sets.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let salt = hasher.generate_salt();
//! let hash = hasher.hash("my_password", &salt).unwrap();
//! assert!(hasher.verify("my_password", &salt, &hash));
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::{ClaimSet, TokenConfig, TokenIssuer, TokenValidator};
//!
//! let config = TokenConfig {
//!     secret: "secret_key_at_least_32_bytes_long!".to_string(),
//!     issuer: "booking-service".to_string(),
//!     audience: "booking-clients".to_string(),
//!     token_lifetime_minutes: 30,
//! };
//!
//! let issuer = TokenIssuer::new(&config).unwrap();
//! let validator = TokenValidator::new(&config).unwrap();
//!
//! let claims = ClaimSet {
//!     subject: "42".to_string(),
//!     name: "alice".to_string(),
//!     role: Some("Client".to_string()),
//! };
//! let token = issuer.issue(&claims).unwrap();
//! let decoded = validator.validate(&token).unwrap();
//! assert_eq!(decoded.sub, "42");
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::bearer_or_cookie;
pub use jwt::ClaimSet;
pub use jwt::Claims;
pub use jwt::TokenConfig;
pub use jwt::TokenConfigError;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use password::PasswordError;
pub use password::PasswordHasher;
