use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use super::super::employees::EmployeeData;
use super::super::ApiError;
use super::super::ApiSuccess;
use crate::domain::principal::errors::EmailError;
use crate::domain::principal::errors::LoginError;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::Login;
use crate::domain::principal::models::RegisterEmployee;
use crate::inbound::http::router::AppState;

pub async fn register_employee(
    State(state): State<AppState>,
    Json(body): Json<RegisterEmployeeRequest>,
) -> Result<ApiSuccess<EmployeeData>, ApiError> {
    state
        .employee_auth
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref employee| ApiSuccess::new(StatusCode::CREATED, employee.into()))
}

/// HTTP request body for employee registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterEmployeeRequest {
    full_name: String,
    date_of_birth: NaiveDate,
    email_address: String,
    phone_number: String,
    working_role: String,
    gender: String,
    login: String,
    password: String,
    working_time: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterEmployeeError {
    #[error("Invalid login: {0}")]
    Login(#[from] LoginError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterEmployeeRequest {
    fn try_into_command(self) -> Result<RegisterEmployee, ParseRegisterEmployeeError> {
        let login = Login::new(self.login)?;
        let email = EmailAddress::new(self.email_address)?;
        Ok(RegisterEmployee {
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            email,
            phone_number: self.phone_number,
            working_role: self.working_role,
            gender: self.gender,
            login,
            password: self.password,
            working_time: self.working_time,
        })
    }
}

impl From<ParseRegisterEmployeeError> for ApiError {
    fn from(err: ParseRegisterEmployeeError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
