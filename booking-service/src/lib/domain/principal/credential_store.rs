use std::sync::Arc;

use auth::PasswordHasher;

use crate::domain::errors::StoreError;
use crate::domain::principal::models::Principal;
use crate::domain::principal::ports::PrincipalDirectory;
use crate::domain::principal::ports::PrincipalEntity;

/// Looks up a principal by login and confirms a supplied password against
/// the stored hash and salt.
///
/// Generic over the storage port so clients and employees share one
/// implementation.
pub struct CredentialStore<D>
where
    D: PrincipalDirectory,
{
    directory: Arc<D>,
    hasher: PasswordHasher,
}

impl<D> CredentialStore<D>
where
    D: PrincipalDirectory,
{
    pub fn new(directory: Arc<D>) -> Self {
        Self {
            directory,
            hasher: PasswordHasher::new(),
        }
    }

    /// Single lookup by login, no side effects.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<Principal>, StoreError> {
        Ok(self
            .directory
            .find_by_login(login)
            .await?
            .map(|entity| entity.principal()))
    }

    /// Verify a credential pair against storage.
    ///
    /// Returns `None` both for an unknown login and for a wrong password,
    /// so the result never reveals whether the login exists.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
    ) -> Result<Option<Principal>, StoreError> {
        let Some(entity) = self.directory.find_by_login(login).await? else {
            return Ok(None);
        };

        let principal = entity.principal();
        if self
            .hasher
            .verify(password, &principal.salt, &principal.password_hash)
        {
            Ok(Some(principal))
        } else {
            Ok(None)
        }
    }

    /// True iff no existing principal of this class owns the email.
    pub async fn email_available(&self, email: &str) -> Result<bool, StoreError> {
        Ok(!self.directory.email_in_use(email).await?)
    }
}
