use std::sync::Arc;

use identity_service::config::Config;
use identity_service::config::DatabaseConfig;
use identity_service::domain::user::ports::AuthServicePort;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::credentials::Argon2CredentialHasher;
use identity_service::outbound::repositories::InMemoryUserRepository;
use identity_service::outbound::repositories::PostgresUserRepository;
use identity_service::outbound::tokens::JwtTokenIssuer;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const MIN_SECRET_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.is_some(),
        jwt_issuer = %config.jwt.issuer,
        access_ttl_minutes = config.jwt.access_ttl_minutes,
        refresh_ttl_days = config.jwt.refresh_ttl_days,
        "Configuration loaded"
    );

    if config.jwt.secret.len() < MIN_SECRET_BYTES {
        tracing::warn!(
            min_bytes = MIN_SECRET_BYTES,
            "JWT secret is shorter than recommended"
        );
    }

    let credential_hasher = Arc::new(Argon2CredentialHasher::default());
    let token_issuer = Arc::new(JwtTokenIssuer::new(config.jwt.token_config()?));
    let access_ttl_seconds = token_issuer.access_ttl_seconds();

    let auth_service: Arc<dyn AuthServicePort> = match &config.database {
        Some(database) => {
            let user_repository = Arc::new(connect_postgres(database).await?);
            Arc::new(AuthService::new(
                user_repository,
                credential_hasher,
                token_issuer,
            ))
        }
        None => {
            tracing::warn!("No database configured, users are kept in memory");
            Arc::new(AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                credential_hasher,
                token_issuer,
            ))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, access_ttl_seconds);

    axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server exited successfully");

    Ok(())
}

async fn connect_postgres(
    database: &DatabaseConfig,
) -> Result<PostgresUserRepository, anyhow::Error> {
    let pg_pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(&database.url)
        .await?;
    tracing::info!(
        max_connections = database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    Ok(PostgresUserRepository::new(pg_pool))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal, shutting down server"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
