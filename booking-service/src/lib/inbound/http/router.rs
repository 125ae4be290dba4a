use std::sync::Arc;
use std::time::Duration;

use auth::TokenValidator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::appointments::by_master::get_appointments_by_master;
use super::handlers::appointments::by_master::get_appointments_by_master_week;
use super::handlers::appointments::create_appointment::create_appointment;
use super::handlers::appointments::delete_appointment::delete_appointment;
use super::handlers::appointments::get_appointment::get_appointment;
use super::handlers::appointments::list_appointments::list_appointments;
use super::handlers::auth::login::login_client;
use super::handlers::auth::login::login_employee;
use super::handlers::auth::register_client::register_client;
use super::handlers::auth::register_employee::register_employee;
use super::handlers::clients::current_client::get_current_client;
use super::handlers::clients::delete_client::delete_client;
use super::handlers::clients::get_client::get_client;
use super::handlers::clients::list_clients::list_clients;
use super::handlers::clients::update_client::update_client;
use super::handlers::employees::delete_employee::delete_employee;
use super::handlers::employees::get_employee::get_employee;
use super::handlers::employees::list_employees::list_employees;
use super::middleware::authenticate as auth_middleware;
use crate::domain::appointment::AppointmentService;
use crate::domain::principal::AuthenticationService;
use crate::outbound::phone::PhoneFormatVerifier;
use crate::outbound::repositories::appointment::PostgresAppointmentRepository;
use crate::outbound::repositories::client::PostgresClientRepository;
use crate::outbound::repositories::employee::PostgresEmployeeRepository;

pub type ClientAuthService =
    AuthenticationService<PostgresClientRepository, PostgresClientRepository, PhoneFormatVerifier>;
pub type EmployeeAuthService = AuthenticationService<
    PostgresEmployeeRepository,
    PostgresEmployeeRepository,
    PhoneFormatVerifier,
>;
pub type Appointments =
    AppointmentService<PostgresAppointmentRepository, PostgresAppointmentRepository>;

/// How the login handlers stamp the auth-token cookie.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    /// Secure flag; on in production deployments.
    pub secure: bool,
    /// Cookie lifetime, matching the token lifetime.
    pub max_age_seconds: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub client_auth: Arc<ClientAuthService>,
    pub employee_auth: Arc<EmployeeAuthService>,
    pub appointments: Arc<Appointments>,
    pub token_validator: Arc<TokenValidator>,
    pub cookies: CookieSettings,
}

pub fn create_router(
    client_auth: Arc<ClientAuthService>,
    employee_auth: Arc<EmployeeAuthService>,
    appointments: Arc<Appointments>,
    token_validator: Arc<TokenValidator>,
    cookies: CookieSettings,
) -> Router {
    let state = AppState {
        client_auth,
        employee_auth,
        appointments,
        token_validator,
        cookies,
    };

    let public_routes = Router::new()
        .route("/api/clients/register", post(register_client))
        .route("/api/clients/login", post(login_client))
        .route("/api/employees/register", post(register_employee))
        .route("/api/employees/login", post(login_employee));

    let protected_routes = Router::new()
        .route("/api/clients", get(list_clients))
        .route("/api/clients/current", get(get_current_client))
        .route("/api/clients/:id", get(get_client))
        .route("/api/clients/:id", put(update_client))
        .route("/api/clients/:id", delete(delete_client))
        .route("/api/employees", get(list_employees))
        .route("/api/employees/:id", get(get_employee))
        .route("/api/employees/:id", delete(delete_employee))
        .route("/api/appointments", post(create_appointment))
        .route("/api/appointments", get(list_appointments))
        .route(
            "/api/appointments/by-master/:id",
            get(get_appointments_by_master),
        )
        .route(
            "/api/appointments/by-master/:id/week",
            get(get_appointments_by_master_week),
        )
        .route("/api/appointments/:id", get(get_appointment))
        .route("/api/appointments/:id", delete(delete_appointment))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
