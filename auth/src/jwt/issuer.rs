use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::ClaimSet;
use super::claims::Claims;
use super::config::TokenConfig;
use super::config::TokenConfigError;
use super::errors::TokenError;

/// Builds and signs bounded-lifetime identity tokens.
///
/// Signing key, issuer, audience, and lifetime are fixed at construction.
/// Tokens are self-contained: a verifier holding the same key validates
/// them without a server-side session store.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenIssuer {
    /// Create a token issuer from the shared signing configuration.
    ///
    /// # Errors
    /// * `TokenConfigError` - Secret, issuer, or audience is missing
    pub fn new(config: &TokenConfig) -> Result<Self, TokenConfigError> {
        config.validate()?;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            lifetime: Duration::minutes(config.token_lifetime_minutes),
        })
    }

    /// Token lifetime in seconds, for cookie expiry alignment.
    pub fn lifetime_seconds(&self) -> i64 {
        self.lifetime.num_seconds()
    }

    /// Sign the claim set into a compact token.
    ///
    /// Stamps issued-at = now and expiry = now + lifetime, then signs
    /// with HMAC-SHA256.
    ///
    /// # Errors
    /// * `Signing` - Token encoding failed
    pub fn issue(&self, claims: &ClaimSet) -> Result<String, TokenError> {
        let now = Utc::now();

        let payload = Claims {
            sub: claims.subject.clone(),
            name: claims.name.clone(),
            role: claims.role.clone(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &payload, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TokenConfig {
        TokenConfig {
            secret: "test_secret_key_at_least_32_bytes!".to_string(),
            issuer: "booking-service".to_string(),
            audience: "booking-clients".to_string(),
            token_lifetime_minutes: 30,
        }
    }

    #[test]
    fn test_issue_produces_three_part_token() {
        let issuer = TokenIssuer::new(&config()).unwrap();

        let token = issuer
            .issue(&ClaimSet {
                subject: "42".to_string(),
                name: "alice".to_string(),
                role: Some("Client".to_string()),
            })
            .expect("Failed to issue token");

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_construction_fails_on_missing_audience() {
        let mut config = config();
        config.audience = String::new();

        assert!(TokenIssuer::new(&config).is_err());
    }

    #[test]
    fn test_lifetime_seconds() {
        let issuer = TokenIssuer::new(&config()).unwrap();
        assert_eq!(issuer.lifetime_seconds(), 30 * 60);
    }
}
