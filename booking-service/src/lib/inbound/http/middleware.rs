use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::inbound::http::router::AppState;

/// Name of the cookie carrying the access token.
pub const AUTH_COOKIE: &str = "auth_token";

/// Extension type carrying the validated identity of the caller.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub id: i32,
    pub login: String,
    pub role: Option<String>,
}

/// Middleware that validates the access token and adds the caller's
/// identity to request extensions.
///
/// An explicit `Authorization: Bearer` credential is preferred; the
/// `auth_token` cookie is the fallback.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = {
        let jar = CookieJar::from_headers(req.headers());
        let cookie_token = jar.get(AUTH_COOKIE).map(|cookie| cookie.value().to_string());
        auth::bearer_or_cookie(bearer_token(&req), cookie_token.as_deref()).map(str::to_string)
    }
    .ok_or_else(|| unauthorized("Missing credentials"))?;

    let claims = state.token_validator.validate(&token).map_err(|e| {
        tracing::warn!("Token validation failed: {}", e);
        unauthorized("Invalid or expired token")
    })?;

    let id: i32 = claims.sub.parse().map_err(|_| {
        tracing::error!("Token subject is not a principal id");
        unauthorized("Invalid token format")
    })?;

    req.extensions_mut().insert(AuthenticatedPrincipal {
        id,
        login: claims.name,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
