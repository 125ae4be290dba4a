use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::EmployeeData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiSuccess<EmployeeData>, ApiError> {
    state
        .employee_auth
        .get(id)
        .await
        .map_err(ApiError::from)
        .map(|ref employee| ApiSuccess::new(StatusCode::OK, employee.into()))
}
