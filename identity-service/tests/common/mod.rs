use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenConfig;
use auth::TokenIssuer;
use identity_service::domain::user::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::credentials::Argon2CredentialHasher;
use identity_service::outbound::repositories::InMemoryUserRepository;
use identity_service::outbound::tokens::JwtTokenIssuer;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const JWT_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const JWT_ISSUER: &str = "identity-service";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    /// Shares the server's signing key, for crafting tokens in tests
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Cheap argon2 parameters keep the suite fast
        let hasher = PasswordHasher::with_params(1024, 1, 1).expect("Invalid argon2 parameters");
        let token_issuer = JwtTokenIssuer::new(Self::token_config());
        let access_ttl_seconds = token_issuer.access_ttl_seconds();

        let auth_service = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2CredentialHasher::new(hasher)),
            Arc::new(token_issuer),
        ));

        let router = create_router(auth_service, access_ttl_seconds);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            token_issuer: TokenIssuer::new(Self::token_config()),
        }
    }

    fn token_config() -> TokenConfig {
        TokenConfig::new(JWT_SECRET, JWT_ISSUER)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register a user and return the response status and body
    pub async fn register(&self, email: &str, password: &str) -> (reqwest::StatusCode, Value) {
        self.send_json("/api/auth/register", json!({ "email": email, "password": password }))
            .await
    }

    /// Log in and return the response status and body
    pub async fn login(&self, email: &str, password: &str) -> (reqwest::StatusCode, Value) {
        self.send_json("/api/auth/login", json!({ "email": email, "password": password }))
            .await
    }

    /// Exchange a refresh token and return the response status and body
    pub async fn refresh(&self, refresh_token: &str) -> (reqwest::StatusCode, Value) {
        self.send_json("/api/auth/refresh", json!({ "refresh_token": refresh_token }))
            .await
    }

    async fn send_json(&self, path: &str, body: Value) -> (reqwest::StatusCode, Value) {
        let response = self
            .post(path)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = response.json().await.expect("Failed to parse response");
        (status, body)
    }
}

/// Throwaway Postgres database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server at `DATABASE_URL`.
    ///
    /// Returns `None` when `DATABASE_URL` is unset so the suite can run
    /// without a server.
    pub async fn from_env() -> Option<Self> {
        let admin_url = std::env::var("DATABASE_URL").ok()?;
        let db_name = format!(
            "test_identity_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            admin_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
