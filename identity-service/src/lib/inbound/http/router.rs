use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::refresh::refresh;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::user::ports::AuthServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    /// Reported to clients as `expires_in`
    pub access_ttl_seconds: i64,
}

pub fn create_router(auth_service: Arc<dyn AuthServicePort>, access_ttl_seconds: i64) -> Router {
    let state = AppState {
        auth_service,
        access_ttl_seconds,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh", post(refresh));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span: they carry bearer tokens.
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
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use auth::PasswordHasher;
    use auth::TokenConfig;
    use axum::http::header;
    use axum::http::StatusCode;
    use serde_json::json;
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::user::service::AuthService;
    use crate::outbound::credentials::Argon2CredentialHasher;
    use crate::outbound::repositories::InMemoryUserRepository;
    use crate::outbound::tokens::JwtTokenIssuer;

    fn app() -> Router {
        let hasher =
            Argon2CredentialHasher::new(PasswordHasher::with_params(1024, 1, 1).unwrap());
        let issuer = JwtTokenIssuer::new(TokenConfig::new(
            "test-secret-key-for-jwt-signing-at-least-32-bytes",
            "identity-service",
        ));
        let ttl = issuer.access_ttl_seconds();

        let service = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(hasher),
            Arc::new(issuer),
        );

        create_router(Arc::new(service), ttl)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();

        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let app = app();
        let credentials = json!({ "email": "a@b.com", "password": "secret1" });

        let (status, body) =
            send(&app, post_json("/api/auth/register", credentials.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status_code"], 201);
        assert_eq!(body["data"]["email"], "a@b.com");

        let (status, body) = send(&app, post_json("/api/auth/login", credentials)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["token_type"], "Bearer");
        assert_eq!(body["data"]["expires_in"], 15 * 60);
    }

    #[tokio::test]
    async fn test_register_validation_is_bad_request() {
        let app = app();

        let (status, body) = send(
            &app,
            post_json(
                "/api/auth/register",
                json!({ "email": "a@b.com", "password": "short" }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"]["message"]
            .as_str()
            .unwrap()
            .contains("Password too short"));
    }

    #[tokio::test]
    async fn test_me_requires_bearer_token() {
        let app = app();

        let request = Request::get("/api/auth/me").body(Body::empty()).unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::get("/api/auth/me")
            .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["status_code"], 401);
    }
}
