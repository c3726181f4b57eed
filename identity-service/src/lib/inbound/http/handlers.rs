use std::future::Future;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod health;
pub mod login;
pub mod me;
pub mod refresh;
pub mod register;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(_) => ApiError::BadRequest(err.to_string()),
            UserError::AlreadyRegistered(_) => ApiError::Conflict(err.to_string()),
            // Unknown email and wrong password must look the same to the client.
            UserError::NoSuchUser(_) | UserError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            UserError::InvalidToken(_) => {
                ApiError::Unauthorized("Invalid or expired token".to_string())
            }
            UserError::Infrastructure(e) => {
                tracing::error!(error = %e, "Request failed on infrastructure error");
                ApiError::InternalServerError(INTERNAL_ERROR.to_string())
            }
        }
    }
}

/// Run a use case on its own task and wait for it.
///
/// A client that disconnects drops the handler future, but the spawned task
/// keeps going, so store writes already under way are not cut short.
pub(crate) async fn run_to_completion<F, T>(use_case: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, UserError>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(use_case)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Use case task did not complete");
            ApiError::InternalServerError(INTERNAL_ERROR.to_string())
        })?
        .map_err(ApiError::from)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}
