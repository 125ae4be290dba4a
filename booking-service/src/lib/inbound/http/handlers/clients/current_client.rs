use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ClientData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedPrincipal;
use crate::inbound::http::router::AppState;

/// The client identified by the caller's own token.
pub async fn get_current_client(
    State(state): State<AppState>,
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    state
        .client_auth
        .get(principal.id)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}
