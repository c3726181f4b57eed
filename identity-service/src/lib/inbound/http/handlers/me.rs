use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::register::UserData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn me(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedUser>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .auth_service
        .current_user(&authenticated.user_id)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}
