use async_trait::async_trait;
use phonenumber::country;

use crate::domain::principal::ports::PhoneNumberVerifier;

/// Phone-number format validation backed by the libphonenumber rules.
pub struct PhoneFormatVerifier;

impl PhoneFormatVerifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PhoneFormatVerifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PhoneNumberVerifier for PhoneFormatVerifier {
    async fn is_valid(&self, number: &str, region: &str) -> bool {
        let Ok(country) = region.parse::<country::Id>() else {
            return false;
        };

        match phonenumber::parse(Some(country), number) {
            Ok(parsed) => phonenumber::is_valid(&parsed),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_valid_numbers_for_their_region() {
        let verifier = PhoneFormatVerifier::new();

        assert!(verifier.is_valid("+7 912 345-67-89", "RU").await);
        assert!(verifier.is_valid("+1 650 253 0000", "US").await);
    }

    #[tokio::test]
    async fn test_garbage_is_rejected() {
        let verifier = PhoneFormatVerifier::new();

        assert!(!verifier.is_valid("12345", "RU").await);
        assert!(!verifier.is_valid("not a number", "RU").await);
    }

    #[tokio::test]
    async fn test_unknown_region_is_rejected() {
        let verifier = PhoneFormatVerifier::new();

        assert!(!verifier.is_valid("+7 912 345-67-89", "XX").await);
    }
}
