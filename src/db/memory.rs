//! In-process [`UserStore`], used by tests and local runs without Postgres.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::UserStore;
use crate::error::{AppError, AppResult};
use crate::models::{AccountId, StoredCredential, UserView};

#[derive(Default)]
struct Inner {
    next_id: AccountId,
    rows: Vec<StoredCredential>,
}

/// Accounts held in memory. The uniqueness check and the insert happen under
/// one write lock, mirroring the database constraint.
#[derive(Default)]
pub struct MemoryUserStore {
    inner: RwLock<Inner>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<AccountId> {
        let mut inner = self.inner.write().await;
        if inner
            .rows
            .iter()
            .any(|c| c.user.username == username || c.user.email == email)
        {
            return Err(AppError::DuplicateIdentity);
        }

        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.push(StoredCredential {
            user: UserView {
                id,
                username: username.to_string(),
                email: email.to_string(),
                created_on: Utc::now(),
            },
            password_hash: password_hash.to_string(),
        });
        Ok(id)
    }

    async fn find_all(&self) -> AppResult<Vec<UserView>> {
        let inner = self.inner.read().await;
        Ok(inner.rows.iter().map(|c| c.user.clone()).collect())
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<UserView> {
        let inner = self.inner.read().await;
        inner
            .rows
            .iter()
            .find(|c| c.user.id == id)
            .map(|c| c.user.clone())
            .ok_or(AppError::NotFound)
    }

    async fn find_credential_by_username(&self, username: &str) -> AppResult<StoredCredential> {
        let inner = self.inner.read().await;
        inner
            .rows
            .iter()
            .find(|c| c.user.username == username)
            .cloned()
            .ok_or(AppError::NotFound)
    }
}
