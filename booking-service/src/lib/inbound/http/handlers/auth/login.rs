use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use serde::Deserialize;
use serde::Serialize;
use time::Duration;

use super::super::ApiError;
use super::super::ApiSuccess;
use crate::domain::principal::models::Credentials;
use crate::inbound::http::middleware::AUTH_COOKIE;
use crate::inbound::http::router::AppState;
use crate::inbound::http::router::CookieSettings;

pub async fn login_client(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let token = state
        .client_auth
        .authenticate(body.into_credentials())
        .await
        .map_err(ApiError::from)?;

    Ok(respond_with_token(jar, token, &state.cookies))
}

pub async fn login_employee(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequestBody>,
) -> Result<(CookieJar, ApiSuccess<LoginResponseData>), ApiError> {
    let token = state
        .employee_auth
        .authenticate(body.into_credentials())
        .await
        .map_err(ApiError::from)?;

    Ok(respond_with_token(jar, token, &state.cookies))
}

/// Deliver the token both in the body and as the auth cookie.
fn respond_with_token(
    jar: CookieJar,
    token: String,
    settings: &CookieSettings,
) -> (CookieJar, ApiSuccess<LoginResponseData>) {
    let cookie = Cookie::build((AUTH_COOKIE, token.clone()))
        .http_only(true)
        .secure(settings.secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(settings.max_age_seconds))
        .build();

    (
        jar.add(cookie),
        ApiSuccess::new(StatusCode::OK, LoginResponseData { token }),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    login: String,
    password: String,
}

impl LoginRequestBody {
    fn into_credentials(self) -> Credentials {
        Credentials {
            login: self.login,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
