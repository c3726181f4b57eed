use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::run_to_completion;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::TokenPair;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    let service = Arc::clone(&state.auth_service);
    let command = LoginCommand::new(body.email, body.password);

    run_to_completion(async move { service.authenticate(command).await })
        .await
        .map(|tokens| {
            ApiSuccess::new(
                StatusCode::OK,
                TokenData::new(tokens, state.access_ttl_seconds),
            )
        })
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

/// Token pair as returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl TokenData {
    pub fn new(tokens: TokenPair, expires_in: i64) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            token_type: "Bearer",
            expires_in,
        }
    }
}
