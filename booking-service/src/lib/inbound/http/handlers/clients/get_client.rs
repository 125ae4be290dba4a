use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ClientData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    state
        .client_auth
        .get(id)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}
