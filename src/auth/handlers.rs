//! Auth HTTP handlers: register, login, logout.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use validator::Validate;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::{LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<RegisterResponse>, AppError> {
    let Json(body) = payload?;
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let id = state.user_service().register(body).await?;
    Ok(Json(RegisterResponse { id }))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(body) = payload?;
    body.validate().map_err(|e| AppError::Validation(e.to_string()))?;
    let res = state.user_service().login(body).await?;
    Ok(Json(res))
}

/// GET /logout
pub async fn logout(State(state): State<AppState>) -> Json<LogoutResponse> {
    Json(state.user_service().logout())
}
