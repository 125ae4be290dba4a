use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::config::TokenConfig;
use super::config::TokenConfigError;
use super::errors::TokenError;

/// Verifies a token's signature, issuer, audience, and expiry.
///
/// Clock-skew tolerance is zero: expiry is enforced exactly, and callers
/// that need leeway must add it explicitly.
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    /// Create a token validator from the shared signing configuration.
    ///
    /// # Errors
    /// * `TokenConfigError` - Secret, issuer, or audience is missing
    pub fn new(config: &TokenConfig) -> Result<Self, TokenConfigError> {
        config.validate()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.leeway = 0;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        })
    }

    /// Validate a token and extract its claims.
    ///
    /// # Errors
    /// * `InvalidSignature` - MAC does not match the configured key
    /// * `Expired` - Now is past the token's expiry
    /// * `WrongIssuer` / `WrongAudience` - Field mismatches configuration
    /// * `Malformed` - Token cannot be parsed
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::from)
    }
}

/// Select the credential to validate: an explicit bearer credential wins,
/// the named cookie is the fallback.
pub fn bearer_or_cookie<'a>(bearer: Option<&'a str>, cookie: Option<&'a str>) -> Option<&'a str> {
    bearer.or(cookie)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::encode;
    use jsonwebtoken::EncodingKey;
    use jsonwebtoken::Header;

    use super::super::claims::ClaimSet;
    use super::super::issuer::TokenIssuer;
    use super::*;

    fn config() -> TokenConfig {
        TokenConfig {
            secret: "test_secret_key_at_least_32_bytes!".to_string(),
            issuer: "booking-service".to_string(),
            audience: "booking-clients".to_string(),
            token_lifetime_minutes: 30,
        }
    }

    fn claim_set() -> ClaimSet {
        ClaimSet {
            subject: "42".to_string(),
            name: "alice".to_string(),
            role: Some("Client".to_string()),
        }
    }

    /// Sign an arbitrary payload with the given secret, bypassing the issuer.
    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn payload() -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            sub: "42".to_string(),
            name: "alice".to_string(),
            role: Some("Client".to_string()),
            iss: "booking-service".to_string(),
            aud: "booking-clients".to_string(),
            iat: now,
            exp: now + 1800,
        }
    }

    #[test]
    fn test_round_trip_preserves_claims() {
        let config = config();
        let issuer = TokenIssuer::new(&config).unwrap();
        let validator = TokenValidator::new(&config).unwrap();

        let claims = claim_set();
        let token = issuer.issue(&claims).expect("Failed to issue token");
        let decoded = validator.validate(&token).expect("Failed to validate token");

        assert_eq!(decoded.claim_set(), claims);
        assert_eq!(decoded.iss, "booking-service");
        assert_eq!(decoded.aud, "booking-clients");
        assert_eq!(decoded.exp - decoded.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = config();
        let validator = TokenValidator::new(&config).unwrap();

        let mut claims = payload();
        claims.iat -= 3600;
        claims.exp = claims.iat + 1800;
        let token = sign(&claims, &config.secret);

        assert_eq!(validator.validate(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let config = config();
        let validator = TokenValidator::new(&config).unwrap();

        let token = sign(&payload(), "another_secret_key_of_32_bytes!!!");

        assert_eq!(
            validator.validate(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let config = config();
        let validator = TokenValidator::new(&config).unwrap();

        let mut claims = payload();
        claims.iss = "someone-else".to_string();
        let token = sign(&claims, &config.secret);

        assert_eq!(validator.validate(&token), Err(TokenError::WrongIssuer));
    }

    #[test]
    fn test_wrong_audience_is_rejected() {
        let config = config();
        let validator = TokenValidator::new(&config).unwrap();

        let mut claims = payload();
        claims.aud = "someone-else".to_string();
        let token = sign(&claims, &config.secret);

        assert_eq!(validator.validate(&token), Err(TokenError::WrongAudience));
    }

    #[test]
    fn test_garbage_is_malformed() {
        let validator = TokenValidator::new(&config()).unwrap();

        assert!(matches!(
            validator.validate("not.a.token"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_bearer_preferred_over_cookie() {
        assert_eq!(
            bearer_or_cookie(Some("from-header"), Some("from-cookie")),
            Some("from-header")
        );
        assert_eq!(bearer_or_cookie(None, Some("from-cookie")), Some("from-cookie"));
        assert_eq!(bearer_or_cookie(None, None), None);
    }
}
