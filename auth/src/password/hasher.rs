use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use subtle::ConstantTimeEq;

use super::errors::PasswordError;

/// Password hashing with explicit per-principal salts.
///
/// The salt is generated once per principal and stored alongside the hash,
/// so the same `(password, salt)` pair always produces the same digest.
/// Internally uses Argon2id.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh random salt in B64 form.
    ///
    /// Salts carry 128 bits of OS randomness and are unique per principal.
    pub fn generate_salt(&self) -> String {
        SaltString::generate(&mut OsRng).to_string()
    }

    /// Hash a plaintext password with the given salt.
    ///
    /// Deterministic for a fixed `(password, salt)` pair.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    /// * `salt` - B64 salt previously produced by [`generate_salt`](Self::generate_salt)
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `InvalidSalt` - Salt is not valid B64
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str, salt: &str) -> Result<String, PasswordError> {
        let salt =
            SaltString::from_b64(salt).map_err(|e| PasswordError::InvalidSalt(e.to_string()))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash and salt.
    ///
    /// Recomputes the digest and compares in constant time, so the result
    /// does not reveal where a mismatch occurs. Malformed salt or hash
    /// input yields `false` rather than an error.
    pub fn verify(&self, password: &str, salt: &str, stored_hash: &str) -> bool {
        match self.hash(password, salt) {
            Ok(candidate) => candidate.as_bytes().ct_eq(stored_hash.as_bytes()).into(),
            Err(_) => false,
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
