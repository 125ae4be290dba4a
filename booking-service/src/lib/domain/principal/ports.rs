use async_trait::async_trait;

use crate::domain::errors::StoreError;
use crate::domain::principal::models::Principal;

/// A persisted aggregate with a repository-assigned integer id.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Insert payload: the entity's fields before the store assigns an id.
    type Draft: Send + Sync + 'static;

    fn id(&self) -> i32;
}

/// An entity that can authenticate: a client or an employee.
pub trait PrincipalEntity: Entity {
    /// Reduce the entity to its authentication-subsystem view.
    fn principal(&self) -> Principal;

    /// Replace the stored credential pair. Hash and salt always change together.
    fn set_password(&mut self, password_hash: String, salt: String);
}

/// Generic create/read/update/delete port.
///
/// `update` is subject to the optimistic-concurrency contract: when the
/// targeted record is gone at commit time the port reports `NotFound`;
/// when it still exists but was mutated by another actor it reports
/// `ConcurrencyConflict`.
#[async_trait]
pub trait EntityRepository<T: Entity>: Send + Sync + 'static {
    /// Persist a new entity; the store assigns the id.
    async fn add(&self, draft: T::Draft) -> Result<T, StoreError>;

    /// Retrieve all entities.
    async fn get(&self) -> Result<Vec<T>, StoreError>;

    /// Retrieve one entity by id (None if absent).
    async fn get_by_id(&self, id: i32) -> Result<Option<T>, StoreError>;

    /// Replace an existing entity.
    async fn update(&self, entity: T) -> Result<T, StoreError>;

    /// Remove an entity by id.
    ///
    /// # Errors
    /// * `NotFound` - No entity with this id
    async fn delete(&self, id: i32) -> Result<(), StoreError>;
}

/// Lookup operations the credential store needs from storage.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync + 'static {
    type Entity: PrincipalEntity;

    /// Single lookup by login, no side effects.
    async fn find_by_login(&self, login: &str) -> Result<Option<Self::Entity>, StoreError>;

    /// True iff an existing principal of this class owns the email.
    async fn email_in_use(&self, email: &str) -> Result<bool, StoreError>;
}

/// External phone-number format collaborator.
#[async_trait]
pub trait PhoneNumberVerifier: Send + Sync + 'static {
    async fn is_valid(&self, number: &str, region: &str) -> bool;
}

/// Registration input for one principal class.
///
/// `into_draft` is the only way a draft obtains its hash and salt, so a
/// stored principal can never carry a caller-supplied hash.
pub trait Registration: Send {
    type Entity: PrincipalEntity;

    fn email(&self) -> &str;
    fn phone_number(&self) -> &str;
    fn password(&self) -> &str;

    /// Build the insert payload from the registration data and the derived
    /// credential pair.
    fn into_draft(self, password_hash: String, salt: String) -> <Self::Entity as Entity>::Draft;
}

/// Profile-replacement input for one principal class.
pub trait ProfileUpdate: Send {
    type Entity: PrincipalEntity;

    /// New plaintext password, when the update changes credentials.
    fn new_password(&self) -> Option<&str>;

    /// Copy the non-credential fields onto the entity.
    fn apply_to(&self, entity: &mut Self::Entity);
}
