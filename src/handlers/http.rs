//! Shared state and the health probe.

use axum::{http::StatusCode, Json};
use serde_json::json;

use crate::auth::TokenIssuer;
use crate::services::UserService;

/// Shared application state for all routes.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

impl AppState {
    pub fn new(user_service: UserService) -> Self {
        Self { user_service }
    }
    pub fn user_service(&self) -> &UserService {
        &self.user_service
    }
    pub fn tokens(&self) -> &TokenIssuer {
        self.user_service.tokens()
    }
}

/// GET /health — liveness probe.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "service": "keyring" })),
    )
}
