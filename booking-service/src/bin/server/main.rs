use std::sync::Arc;

use anyhow::Context;
use auth::TokenIssuer;
use auth::TokenValidator;
use booking_service::config::Config;
use booking_service::domain::appointment::AppointmentService;
use booking_service::domain::principal::AuthenticationService;
use booking_service::inbound::http::router::create_router;
use booking_service::inbound::http::router::CookieSettings;
use booking_service::outbound::phone::PhoneFormatVerifier;
use booking_service::outbound::repositories::PostgresAppointmentRepository;
use booking_service::outbound::repositories::PostgresClientRepository;
use booking_service::outbound::repositories::PostgresEmployeeRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "booking-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %config.jwt.issuer,
        jwt_audience = %config.jwt.audience,
        token_lifetime_minutes = config.jwt.token_lifetime_minutes,
        phone_region = %config.phone.default_region,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    // Fail closed: no server without a complete signing configuration.
    let token_issuer =
        Arc::new(TokenIssuer::new(&config.jwt).context("JWT configuration is incomplete")?);
    let token_validator =
        Arc::new(TokenValidator::new(&config.jwt).context("JWT configuration is incomplete")?);

    let phone_verifier = Arc::new(PhoneFormatVerifier::new());
    let client_repository = Arc::new(PostgresClientRepository::new(pg_pool.clone()));
    let employee_repository = Arc::new(PostgresEmployeeRepository::new(pg_pool.clone()));
    let appointment_repository = Arc::new(PostgresAppointmentRepository::new(pg_pool));

    let client_auth = Arc::new(AuthenticationService::new(
        Arc::clone(&client_repository),
        Arc::clone(&client_repository),
        Arc::clone(&phone_verifier),
        Arc::clone(&token_issuer),
        config.phone.default_region.clone(),
    ));
    let employee_auth = Arc::new(AuthenticationService::new(
        Arc::clone(&employee_repository),
        Arc::clone(&employee_repository),
        Arc::clone(&phone_verifier),
        Arc::clone(&token_issuer),
        config.phone.default_region.clone(),
    ));
    let appointments = Arc::new(AppointmentService::new(
        Arc::clone(&appointment_repository),
        Arc::clone(&appointment_repository),
    ));

    let cookies = CookieSettings {
        secure: config.server.secure_cookies,
        max_age_seconds: token_issuer.lifetime_seconds(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        client_auth,
        employee_auth,
        appointments,
        token_validator,
        cookies,
    );

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
