pub mod appointment;
pub mod errors;
pub mod principal;
