pub mod appointment;
pub mod client;
pub mod employee;

pub use appointment::PostgresAppointmentRepository;
pub use client::PostgresClientRepository;
pub use employee::PostgresEmployeeRepository;
