use serde::Deserialize;
use thiserror::Error;

/// Default token lifetime when the configuration omits one.
pub const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 30;

/// Signing configuration shared by [`TokenIssuer`](super::TokenIssuer) and
/// [`TokenValidator`](super::TokenValidator).
///
/// Read once at startup. Issuing unsigned or misconfigured tokens is
/// unacceptable, so construction of either component fails if a value
/// is missing.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// Symmetric signing key; at least 256 bits for HS256.
    pub secret: String,

    /// Issuer identifier stamped into and required of every token.
    pub issuer: String,

    /// Audience identifier stamped into and required of every token.
    pub audience: String,

    /// Token lifetime in minutes.
    #[serde(default = "default_lifetime")]
    pub token_lifetime_minutes: i64,
}

fn default_lifetime() -> i64 {
    DEFAULT_TOKEN_LIFETIME_MINUTES
}

/// Error raised when the token configuration is unusable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenConfigError {
    #[error("JWT {0} is missing in configuration")]
    Missing(&'static str),
}

impl TokenConfig {
    pub(crate) fn validate(&self) -> Result<(), TokenConfigError> {
        if self.secret.is_empty() {
            return Err(TokenConfigError::Missing("secret key"));
        }
        if self.issuer.is_empty() {
            return Err(TokenConfigError::Missing("issuer"));
        }
        if self.audience.is_empty() {
            return Err(TokenConfigError::Missing("audience"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_config_is_valid() {
        let config = TokenConfig {
            secret: "secret_key_at_least_32_bytes_long!".to_string(),
            issuer: "booking-service".to_string(),
            audience: "booking-clients".to_string(),
            token_lifetime_minutes: 30,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_values_fail_fast() {
        let config = TokenConfig {
            secret: String::new(),
            issuer: "booking-service".to_string(),
            audience: "booking-clients".to_string(),
            token_lifetime_minutes: 30,
        };
        assert_eq!(
            config.validate(),
            Err(TokenConfigError::Missing("secret key"))
        );

        let config = TokenConfig {
            secret: "secret_key_at_least_32_bytes_long!".to_string(),
            issuer: String::new(),
            audience: "booking-clients".to_string(),
            token_lifetime_minutes: 30,
        };
        assert_eq!(config.validate(), Err(TokenConfigError::Missing("issuer")));
    }
}
