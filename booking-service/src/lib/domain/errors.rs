use thiserror::Error;

/// Error surface of the persistence ports.
///
/// `ConcurrencyConflict` means the targeted record still exists but was
/// mutated by another actor between read and commit; a record that is gone
/// at commit time is reported as `NotFound` instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Record was modified concurrently")]
    ConcurrencyConflict,

    #[error("{0} is already taken")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}
