//! Protected account lookups. Both routes sit behind `require_auth`.

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::middleware::AuthUser;
use crate::models::{AccountId, UserView};

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<Json<Vec<UserView>>, AppError> {
    debug!(caller, "listing users");
    let users = state.user_service().list_users().await?;
    Ok(Json(users))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<UserView>, AppError> {
    let id: AccountId = id
        .parse()
        .map_err(|_| AppError::Validation("Invalid user id".to_string()))?;
    debug!(caller, id, "fetching user");
    let user = state.user_service().get_user(id).await?;
    Ok(Json(user))
}
