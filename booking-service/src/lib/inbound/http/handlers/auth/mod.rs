pub mod login;
pub mod register_client;
pub mod register_employee;
