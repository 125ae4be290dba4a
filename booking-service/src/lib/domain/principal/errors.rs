use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::errors::StoreError;

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Login too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Login contains invalid characters (only alphanumeric, underscore, and hyphen allowed)")]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for authentication, registration, and profile operations.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Bad login or bad password; the caller must not learn which.
    #[error("Invalid credentials")]
    AuthenticationFailure,

    #[error("Email address is already in use: {0}")]
    DuplicateEmail(String),

    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Principal not found")]
    NotFound,

    #[error("Record was modified concurrently")]
    ConcurrencyConflict,

    #[error("{0} is already taken")]
    Duplicate(String),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AuthError::NotFound,
            StoreError::ConcurrencyConflict => AuthError::ConcurrencyConflict,
            StoreError::Duplicate(field) => AuthError::Duplicate(field),
            StoreError::Database(msg) => AuthError::Database(msg),
        }
    }
}
