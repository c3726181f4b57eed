use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login::TokenData;
use super::run_to_completion;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a refresh token for a new pair. The presented token stops
/// working once this succeeds.
pub async fn refresh(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<ApiSuccess<TokenData>, ApiError> {
    let service = Arc::clone(&state.auth_service);

    run_to_completion(async move { service.refresh(&body.refresh_token).await })
        .await
        .map(|tokens| {
            ApiSuccess::new(
                StatusCode::OK,
                TokenData::new(tokens, state.access_ttl_seconds),
            )
        })
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshRequest {
    refresh_token: String,
}
