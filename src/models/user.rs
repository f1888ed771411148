//! Account models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Database-assigned account identifier.
pub type AccountId = i32;

/// Public projection of an account. The password hash never appears here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub created_on: DateTime<Utc>,
}

/// An account together with its stored password hash. Only produced by the
/// username lookup used at login.
#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub user: UserView,
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[validate(email)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: AccountId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: UserView,
    pub access_token: String,
    pub refresh_token: String,
}

/// Tokens are stateless, so logging out only tells the client to drop them.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub message: String,
}

impl Default for LogoutResponse {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            refresh_token: String::new(),
            message: "logout successful".to_string(),
        }
    }
}
