use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::principal::models::Client;

pub mod current_client;
pub mod delete_client;
pub mod get_client;
pub mod list_clients;
pub mod update_client;

/// Client representation exposed over HTTP.
///
/// Deliberately omits the stored hash and salt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientData {
    pub id: i32,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub phone_number: String,
    pub email: String,
    pub gender: String,
    pub login: String,
}

impl From<&Client> for ClientData {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id,
            name: client.name.clone(),
            date_of_birth: client.date_of_birth,
            phone_number: client.phone_number.clone(),
            email: client.email.as_str().to_string(),
            gender: client.gender.clone(),
            login: client.login.as_str().to_string(),
        }
    }
}
