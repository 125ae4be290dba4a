use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::super::clients::ClientData;
use super::super::ApiError;
use super::super::ApiSuccess;
use crate::domain::principal::errors::EmailError;
use crate::domain::principal::errors::LoginError;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Login;
use crate::domain::principal::models::RegisterClient;
use crate::inbound::http::router::AppState;

pub async fn register_client(
    State(state): State<AppState>,
    Json(body): Json<RegisterClientRequest>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    state
        .client_auth
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::CREATED, client.into()))
}

/// HTTP request body for client registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterClientRequest {
    name: String,
    date_of_birth: NaiveDate,
    phone_number: String,
    email_address: String,
    gender: String,
    login: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterClientError {
    #[error("Invalid login: {0}")]
    Login(#[from] LoginError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterClientRequest {
    fn try_into_command(self) -> Result<RegisterClient, ParseRegisterClientError> {
        let login = Login::new(self.login)?;
        let email = EmailAddress::new(self.email_address)?;
        Ok(RegisterClient {
            name: self.name,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number,
            email,
            gender: self.gender,
            login,
            password: self.password,
        })
    }
}

impl From<ParseRegisterClientError> for ApiError {
    fn from(err: ParseRegisterClientError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
