pub mod credential_store;
pub mod errors;
pub mod models;
pub mod ports;
pub mod service;

pub use credential_store::CredentialStore;
pub use service::AuthenticationService;
