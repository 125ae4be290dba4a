use std::sync::Arc;

use auth::ClaimSet;
use auth::PasswordHasher;
use auth::TokenIssuer;

use crate::domain::principal::credential_store::CredentialStore;
use crate::domain::principal::errors::AuthError;
use crate::domain::principal::models::Credentials;
use crate::domain::principal::ports::Entity;
use crate::domain::principal::ports::EntityRepository;
use crate::domain::principal::ports::PhoneNumberVerifier;
use crate::domain::principal::ports::PrincipalDirectory;
use crate::domain::principal::ports::PrincipalEntity;
use crate::domain::principal::ports::ProfileUpdate;
use crate::domain::principal::ports::Registration;

/// Turns a login request into a signed token and a registration request
/// into a stored principal.
///
/// Generic over the principal class: instantiated once for clients and
/// once for employees, each with its own storage adapters.
pub struct AuthenticationService<D, R, P>
where
    D: PrincipalDirectory,
    R: EntityRepository<D::Entity>,
    P: PhoneNumberVerifier,
{
    credential_store: CredentialStore<D>,
    repository: Arc<R>,
    phone_verifier: Arc<P>,
    token_issuer: Arc<TokenIssuer>,
    hasher: PasswordHasher,
    phone_region: String,
}

impl<D, R, P> AuthenticationService<D, R, P>
where
    D: PrincipalDirectory,
    R: EntityRepository<D::Entity>,
    P: PhoneNumberVerifier,
{
    /// Create a new authentication service with injected collaborators.
    pub fn new(
        directory: Arc<D>,
        repository: Arc<R>,
        phone_verifier: Arc<P>,
        token_issuer: Arc<TokenIssuer>,
        phone_region: impl Into<String>,
    ) -> Self {
        Self {
            credential_store: CredentialStore::new(directory),
            repository,
            phone_verifier,
            token_issuer,
            hasher: PasswordHasher::new(),
            phone_region: phone_region.into(),
        }
    }

    /// Verify credentials and issue a signed token.
    ///
    /// # Errors
    /// * `AuthenticationFailure` - Unknown login or wrong password; the
    ///   caller cannot tell which
    /// * `Token` - Token signing failed
    pub async fn authenticate(&self, credentials: Credentials) -> Result<String, AuthError> {
        let principal = self
            .credential_store
            .authenticate(&credentials.login, &credentials.password)
            .await?
            .ok_or_else(|| {
                tracing::warn!("Failed login attempt: wrong login or password");
                AuthError::AuthenticationFailure
            })?;

        let claims = ClaimSet {
            subject: principal.id.to_string(),
            name: principal.login.clone(),
            role: Some(principal.role.clone()),
        };

        Ok(self.token_issuer.issue(&claims)?)
    }

    /// Register a new principal.
    ///
    /// The plaintext password and the generated salt never leave this
    /// method except inside the persisted draft.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email already owned by a principal of this class
    /// * `InvalidPhoneNumber` - Rejected by the phone-format collaborator
    /// * `Password` - Hashing failed
    pub async fn register<Reg>(&self, registration: Reg) -> Result<D::Entity, AuthError>
    where
        Reg: Registration<Entity = D::Entity>,
    {
        if !self
            .credential_store
            .email_available(registration.email())
            .await?
        {
            return Err(AuthError::DuplicateEmail(registration.email().to_string()));
        }

        if !self
            .phone_verifier
            .is_valid(registration.phone_number(), &self.phone_region)
            .await
        {
            return Err(AuthError::InvalidPhoneNumber(
                registration.phone_number().to_string(),
            ));
        }

        let salt = self.hasher.generate_salt();
        let password_hash = self.hasher.hash(registration.password(), &salt)?;
        let draft = registration.into_draft(password_hash, salt);

        let created = self.repository.add(draft).await?;
        tracing::info!(id = created.id(), "Principal registered");

        Ok(created)
    }

    /// Retrieve all principals of this class.
    pub async fn list(&self) -> Result<Vec<D::Entity>, AuthError> {
        Ok(self.repository.get().await?)
    }

    /// Retrieve one principal by id.
    ///
    /// # Errors
    /// * `NotFound` - No principal with this id
    pub async fn get(&self, id: i32) -> Result<D::Entity, AuthError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(AuthError::NotFound)
    }

    /// Replace a principal's profile.
    ///
    /// When the update carries a new password, the salt and hash are
    /// regenerated together; otherwise both stay untouched. A record
    /// deleted by another actor before commit surfaces as `NotFound`.
    ///
    /// # Errors
    /// * `NotFound` - Principal absent before or at commit time
    /// * `ConcurrencyConflict` - Record mutated mid-update by another actor
    pub async fn update_profile<Upd>(&self, id: i32, update: Upd) -> Result<D::Entity, AuthError>
    where
        Upd: ProfileUpdate<Entity = D::Entity>,
    {
        let mut entity = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(AuthError::NotFound)?;

        update.apply_to(&mut entity);

        if let Some(password) = update.new_password() {
            let salt = self.hasher.generate_salt();
            let password_hash = self.hasher.hash(password, &salt)?;
            entity.set_password(password_hash, salt);
        }

        Ok(self.repository.update(entity).await?)
    }

    /// Remove a principal.
    ///
    /// # Errors
    /// * `NotFound` - No principal with this id
    pub async fn delete(&self, id: i32) -> Result<(), AuthError> {
        Ok(self.repository.delete(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::TokenConfig;
    use auth::TokenValidator;
    use chrono::NaiveDate;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::errors::StoreError;
    use crate::domain::principal::models::Client;
    use crate::domain::principal::models::ClientDraft;
    use crate::domain::principal::models::EmailAddress;
    use crate::domain::principal::models::Login;
    use crate::domain::principal::models::RegisterClient;
    use crate::domain::principal::models::UpdateClientProfile;
    use crate::domain::principal::models::CLIENT_ROLE;

    mock! {
        pub TestClientDirectory {}

        #[async_trait]
        impl PrincipalDirectory for TestClientDirectory {
            type Entity = Client;

            async fn find_by_login(&self, login: &str) -> Result<Option<Client>, StoreError>;
            async fn email_in_use(&self, email: &str) -> Result<bool, StoreError>;
        }
    }

    mock! {
        pub TestClientRepository {}

        #[async_trait]
        impl EntityRepository<Client> for TestClientRepository {
            async fn add(&self, draft: ClientDraft) -> Result<Client, StoreError>;
            async fn get(&self) -> Result<Vec<Client>, StoreError>;
            async fn get_by_id(&self, id: i32) -> Result<Option<Client>, StoreError>;
            async fn update(&self, entity: Client) -> Result<Client, StoreError>;
            async fn delete(&self, id: i32) -> Result<(), StoreError>;
        }
    }

    mock! {
        pub TestPhoneVerifier {}

        #[async_trait]
        impl PhoneNumberVerifier for TestPhoneVerifier {
            async fn is_valid(&self, number: &str, region: &str) -> bool;
        }
    }

    fn token_config() -> TokenConfig {
        TokenConfig {
            secret: "test_secret_key_at_least_32_bytes!".to_string(),
            issuer: "booking-service".to_string(),
            audience: "booking-clients".to_string(),
            token_lifetime_minutes: 30,
        }
    }

    fn service(
        directory: MockTestClientDirectory,
        repository: MockTestClientRepository,
        phone_verifier: MockTestPhoneVerifier,
    ) -> AuthenticationService<MockTestClientDirectory, MockTestClientRepository, MockTestPhoneVerifier>
    {
        AuthenticationService::new(
            Arc::new(directory),
            Arc::new(repository),
            Arc::new(phone_verifier),
            Arc::new(TokenIssuer::new(&token_config()).unwrap()),
            "RU",
        )
    }

    fn client_with_password(password: &str) -> Client {
        let hasher = PasswordHasher::new();
        let salt = hasher.generate_salt();
        let password_hash = hasher.hash(password, &salt).unwrap();

        Client {
            id: 7,
            name: "Alice".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone_number: "+7 921 123-45-67".to_string(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            gender: "F".to_string(),
            login: Login::new("alice".to_string()).unwrap(),
            password_hash,
            salt,
            row_version: 1,
        }
    }

    fn client_from_draft(id: i32, draft: ClientDraft) -> Client {
        Client {
            id,
            name: draft.name,
            date_of_birth: draft.date_of_birth,
            phone_number: draft.phone_number,
            email: draft.email,
            gender: draft.gender,
            login: draft.login,
            password_hash: draft.password_hash,
            salt: draft.salt,
            row_version: 1,
        }
    }

    fn register_command() -> RegisterClient {
        RegisterClient {
            name: "Alice".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone_number: "+7 921 123-45-67".to_string(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            gender: "F".to_string(),
            login: Login::new("alice".to_string()).unwrap(),
            password: "pass_word!".to_string(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success_issues_valid_token() {
        let mut directory = MockTestClientDirectory::new();
        let repository = MockTestClientRepository::new();
        let phone_verifier = MockTestPhoneVerifier::new();

        let stored = client_with_password("pass_word!");
        directory
            .expect_find_by_login()
            .withf(|login| login == "alice")
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = service(directory, repository, phone_verifier);

        let token = service
            .authenticate(Credentials {
                login: "alice".to_string(),
                password: "pass_word!".to_string(),
            })
            .await
            .expect("Authentication failed");

        let validator = TokenValidator::new(&token_config()).unwrap();
        let claims = validator.validate(&token).expect("Token validation failed");
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.name, "alice");
        assert_eq!(claims.role.as_deref(), Some(CLIENT_ROLE));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_login_and_wrong_password_look_identical() {
        let mut directory = MockTestClientDirectory::new();
        directory
            .expect_find_by_login()
            .times(1)
            .returning(|_| Ok(None));
        let unknown_login = service(
            directory,
            MockTestClientRepository::new(),
            MockTestPhoneVerifier::new(),
        );

        let mut directory = MockTestClientDirectory::new();
        let stored = client_with_password("correct_password");
        directory
            .expect_find_by_login()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        let wrong_password = service(
            directory,
            MockTestClientRepository::new(),
            MockTestPhoneVerifier::new(),
        );

        let credentials = Credentials {
            login: "alice".to_string(),
            password: "bad_password".to_string(),
        };

        let first = unknown_login.authenticate(credentials.clone()).await;
        let second = wrong_password.authenticate(credentials).await;

        let first = first.unwrap_err();
        let second = second.unwrap_err();
        assert!(matches!(first, AuthError::AuthenticationFailure));
        assert!(matches!(second, AuthError::AuthenticationFailure));
        assert_eq!(first.to_string(), second.to_string());
    }

    #[tokio::test]
    async fn test_register_success_stores_hashed_credentials() {
        let mut directory = MockTestClientDirectory::new();
        let mut repository = MockTestClientRepository::new();
        let mut phone_verifier = MockTestPhoneVerifier::new();

        directory
            .expect_email_in_use()
            .withf(|email| email == "a@x.com")
            .times(1)
            .returning(|_| Ok(false));

        phone_verifier
            .expect_is_valid()
            .withf(|number, region| number == "+7 921 123-45-67" && region == "RU")
            .times(1)
            .returning(|_, _| true);

        repository
            .expect_add()
            .withf(|draft| {
                draft.password_hash.starts_with("$argon2")
                    && draft.password_hash != "pass_word!"
                    && !draft.salt.is_empty()
            })
            .times(1)
            .returning(|draft| Ok(client_from_draft(1, draft)));

        let service = service(directory, repository, phone_verifier);

        let created = service
            .register(register_command())
            .await
            .expect("Registration failed");

        assert_eq!(created.login.as_str(), "alice");
        assert!(created.password_hash.starts_with("$argon2"));
        assert!(!created.salt.is_empty());
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut directory = MockTestClientDirectory::new();
        let mut repository = MockTestClientRepository::new();
        let mut phone_verifier = MockTestPhoneVerifier::new();

        directory
            .expect_email_in_use()
            .times(1)
            .returning(|_| Ok(true));
        phone_verifier.expect_is_valid().times(0);
        repository.expect_add().times(0);

        let service = service(directory, repository, phone_verifier);

        let result = service.register(register_command()).await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_invalid_phone_number() {
        let mut directory = MockTestClientDirectory::new();
        let mut repository = MockTestClientRepository::new();
        let mut phone_verifier = MockTestPhoneVerifier::new();

        directory
            .expect_email_in_use()
            .times(1)
            .returning(|_| Ok(false));
        phone_verifier
            .expect_is_valid()
            .times(1)
            .returning(|_, _| false);
        repository.expect_add().times(0);

        let service = service(directory, repository, phone_verifier);

        let result = service.register(register_command()).await;
        assert!(matches!(result, Err(AuthError::InvalidPhoneNumber(_))));
    }

    fn update_command(password: Option<&str>) -> UpdateClientProfile {
        UpdateClientProfile {
            name: "Alice Updated".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            phone_number: "+7 921 123-45-67".to_string(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            gender: "F".to_string(),
            login: Login::new("alice".to_string()).unwrap(),
            password: password.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_update_profile_with_password_replaces_hash_and_salt() {
        let mut directory = MockTestClientDirectory::new();
        let mut repository = MockTestClientRepository::new();
        let phone_verifier = MockTestPhoneVerifier::new();
        directory.expect_find_by_login().times(0);

        let existing = client_with_password("old_password");
        let old_hash = existing.password_hash.clone();
        let old_salt = existing.salt.clone();

        repository
            .expect_get_by_id()
            .with(eq(7))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(move |client| {
                client.name == "Alice Updated"
                    && client.password_hash != old_hash
                    && client.salt != old_salt
            })
            .times(1)
            .returning(|client| Ok(client));

        let service = service(directory, repository, phone_verifier);

        let updated = service
            .update_profile(7, update_command(Some("new_password")))
            .await
            .expect("Update failed");
        assert_eq!(updated.name, "Alice Updated");
    }

    #[tokio::test]
    async fn test_update_profile_without_password_keeps_credentials() {
        let mut repository = MockTestClientRepository::new();

        let existing = client_with_password("old_password");
        let old_hash = existing.password_hash.clone();
        let old_salt = existing.salt.clone();

        repository
            .expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(move |client| client.password_hash == old_hash && client.salt == old_salt)
            .times(1)
            .returning(|client| Ok(client));

        let service = service(
            MockTestClientDirectory::new(),
            repository,
            MockTestPhoneVerifier::new(),
        );

        let result = service.update_profile(7, update_command(None)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_update_profile_of_concurrently_deleted_principal_is_not_found() {
        let mut repository = MockTestClientRepository::new();

        let existing = client_with_password("old_password");
        repository
            .expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        // The record vanished between read and commit.
        repository
            .expect_update()
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let service = service(
            MockTestClientDirectory::new(),
            repository,
            MockTestPhoneVerifier::new(),
        );

        let result = service.update_profile(7, update_command(None)).await;
        assert!(matches!(result, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_profile_conflict_on_surviving_record_propagates() {
        let mut repository = MockTestClientRepository::new();

        let existing = client_with_password("old_password");
        repository
            .expect_get_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .times(1)
            .returning(|_| Err(StoreError::ConcurrencyConflict));

        let service = service(
            MockTestClientDirectory::new(),
            repository,
            MockTestPhoneVerifier::new(),
        );

        let result = service.update_profile(7, update_command(None)).await;
        assert!(matches!(result, Err(AuthError::ConcurrencyConflict)));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut repository = MockTestClientRepository::new();
        repository
            .expect_get_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(
            MockTestClientDirectory::new(),
            repository,
            MockTestPhoneVerifier::new(),
        );

        let result = service.get(99).await;
        assert!(matches!(result, Err(AuthError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_principal_is_not_found() {
        let mut repository = MockTestClientRepository::new();
        repository
            .expect_delete()
            .with(eq(99))
            .times(1)
            .returning(|_| Err(StoreError::NotFound));

        let service = service(
            MockTestClientDirectory::new(),
            repository,
            MockTestPhoneVerifier::new(),
        );

        let result = service.delete(99).await;
        assert!(matches!(result, Err(AuthError::NotFound)));
    }
}
