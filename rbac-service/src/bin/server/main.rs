use std::sync::Arc;

use auth::TokenService;
use chrono::Duration;
use rbac_service::access::service::AccessService;
use rbac_service::config::Config;
use rbac_service::domain::auth::service::AuthService;
use rbac_service::inbound::http::router::create_router;
use rbac_service::repositories::PostgresAccessRepository;
use rbac_service::repositories::PostgresUserRepository;
use rbac_service::user::service::UserService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rbac_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "rbac-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
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

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let access_repository = Arc::new(PostgresAccessRepository::new(pg_pool));

    let token_service = TokenService::with_ttls(
        config.jwt.secret.as_bytes(),
        Duration::minutes(config.jwt.access_ttl_minutes),
        Duration::days(config.jwt.refresh_ttl_days),
    );

    let user_service = Arc::new(UserService::new(
        Arc::clone(&user_repository),
        Arc::clone(&access_repository),
    ));
    let access_service = Arc::new(AccessService::new(Arc::clone(&access_repository)));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        access_repository,
        token_service,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, access_service, auth_service);

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
