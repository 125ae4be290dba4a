use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::ClientData;
use crate::domain::principal::errors::EmailError;
use crate::domain::principal::errors::LoginError;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Login;
use crate::domain::principal::models::UpdateClientProfile;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateClientRequest>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    state
        .client_auth
        .update_profile(id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}

/// HTTP request body replacing a client's profile (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateClientRequest {
    name: String,
    date_of_birth: NaiveDate,
    phone_number: String,
    email_address: String,
    gender: String,
    login: String,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateClientError {
    #[error("Invalid login: {0}")]
    Login(#[from] LoginError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl UpdateClientRequest {
    fn try_into_command(self) -> Result<UpdateClientProfile, ParseUpdateClientError> {
        let login = Login::new(self.login)?;
        let email = EmailAddress::new(self.email_address)?;
        Ok(UpdateClientProfile {
            name: self.name,
            date_of_birth: self.date_of_birth,
            phone_number: self.phone_number,
            email,
            gender: self.gender,
            login,
            // An empty password means "leave the credentials alone".
            password: self.password.filter(|password| !password.is_empty()),
        })
    }
}

impl From<ParseUpdateClientError> for ApiError {
    fn from(err: ParseUpdateClientError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
