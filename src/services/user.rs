//! Account orchestration: register, login, logout, lookups.
//!
//! Input shape is validated by the HTTP layer before anything here runs.

use std::sync::Arc;

use tracing::{debug, info};

use crate::auth::password::{hash_password_blocking, verify_password_blocking};
use crate::auth::TokenIssuer;
use crate::db::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::{
    AccountId, LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, UserView,
};

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    tokens: TokenIssuer,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Hash the password and persist the account. `DuplicateIdentity` and
    /// storage errors pass through untouched.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<AccountId> {
        let password_hash = hash_password_blocking(request.password).await?;
        let id = self
            .store
            .insert(&request.username, &request.email, &password_hash)
            .await?;
        info!(id, username = %request.username, "account registered");
        Ok(id)
    }

    /// Unknown username and wrong password both end in
    /// [`AppError::InvalidCredentials`].
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let credential = match self
            .store
            .find_credential_by_username(&request.username)
            .await
        {
            Ok(credential) => credential,
            Err(AppError::NotFound) => {
                debug!(username = %request.username, "login for unknown username");
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !verify_password_blocking(request.password, credential.password_hash).await {
            debug!(username = %request.username, "login with wrong password");
            return Err(AppError::InvalidCredentials);
        }

        let pair = self.tokens.issue(credential.user.id)?;
        info!(id = credential.user.id, "login succeeded");
        Ok(LoginResponse {
            user: credential.user,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }

    /// Nothing to invalidate server-side; tokens live until they expire.
    pub fn logout(&self) -> LogoutResponse {
        LogoutResponse::default()
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserView>> {
        self.store.find_all().await
    }

    pub async fn get_user(&self, id: AccountId) -> AppResult<UserView> {
        self.store.find_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryUserStore;

    fn service() -> UserService {
        let tokens = TokenIssuer::new("test-jwt-secret-min-32-chars!!").unwrap();
        UserService::new(Arc::new(MemoryUserStore::new()), tokens)
    }

    fn register(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: "hunter2pass".to_string(),
            email: email.to_string(),
        }
    }

    fn login(username: &str, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_then_login_issues_tokens() {
        let svc = service();
        let id = svc.register(register("alice", "a@x.com")).await.unwrap();
        assert_eq!(id, 1);

        let res = svc.login(login("alice", "hunter2pass")).await.unwrap();
        assert_eq!(res.user.id, 1);
        assert_eq!(res.user.username, "alice");
        assert_eq!(svc.tokens().verify(&res.access_token).unwrap(), 1);
        assert_eq!(svc.tokens().verify(&res.refresh_token).unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let svc = service();
        svc.register(register("alice", "a@x.com")).await.unwrap();
        let err = svc.register(register("alice", "b@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentity));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let svc = service();
        svc.register(register("alice", "a@x.com")).await.unwrap();
        let err = svc.register(register("bob", "a@x.com")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateIdentity));
    }

    #[tokio::test]
    async fn bad_password_and_unknown_user_look_the_same() {
        let svc = service();
        svc.register(register("alice", "a@x.com")).await.unwrap();

        let wrong_password = svc.login(login("alice", "not-the-password")).await;
        let unknown_user = svc.login(login("mallory", "hunter2pass")).await;

        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown_user, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn stored_hash_is_not_the_password() {
        let store = Arc::new(MemoryUserStore::new());
        let tokens = TokenIssuer::new("test-jwt-secret-min-32-chars!!").unwrap();
        let svc = UserService::new(store.clone(), tokens);
        svc.register(register("alice", "a@x.com")).await.unwrap();

        let credential = store.find_credential_by_username("alice").await.unwrap();
        assert_ne!(credential.password_hash, "hunter2pass");
        assert!(credential.password_hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn lookups() {
        let svc = service();
        assert!(svc.list_users().await.unwrap().is_empty());
        svc.register(register("alice", "a@x.com")).await.unwrap();
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
        assert_eq!(svc.get_user(1).await.unwrap().email, "a@x.com");
        assert!(matches!(svc.get_user(99).await, Err(AppError::NotFound)));
    }

    #[test]
    fn logout_is_acknowledged() {
        assert_eq!(service().logout().message, "logout successful");
    }
}
