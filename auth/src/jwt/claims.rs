use serde::Deserialize;
use serde::Serialize;

/// Claims supplied by the caller when a token is issued.
///
/// Carries the identity facts of a principal; issuance stamps the
/// issuer, audience, and lifetime fields on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    /// Subject: the principal's stable identifier.
    pub subject: String,

    /// Name: the principal's login.
    pub name: String,

    /// Role claim; optional per principal kind.
    pub role: Option<String>,
}

/// Full claim payload of a signed token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (principal identifier)
    pub sub: String,

    /// Name (principal login)
    pub name: String,

    /// Role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Project the caller-supplied portion back out of a validated token.
    pub fn claim_set(&self) -> ClaimSet {
        ClaimSet {
            subject: self.sub.clone(),
            name: self.name.clone(),
            role: self.role.clone(),
        }
    }

    /// Check whether the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
