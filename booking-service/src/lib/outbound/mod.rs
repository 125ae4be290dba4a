pub mod phone;
pub mod repositories;
