//! Application error types.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors.
///
/// The unit variants are deliberately payload-free: login and token failures
/// collapse into one outcome each so callers cannot tell the causes apart.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("invalid request body")]
    InvalidBody(#[from] JsonRejection),

    #[error("user with this username or email already exists")]
    DuplicateIdentity,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not found")]
    NotFound,

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid token")]
    InvalidToken,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidBody(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "rejected request body");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::DuplicateIdentity => (StatusCode::CONFLICT, self.to_string()),
            AppError::InvalidCredentials | AppError::Unauthorized | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Config(_)
            | AppError::Hashing(_)
            | AppError::Signing(_)
            | AppError::Db(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
