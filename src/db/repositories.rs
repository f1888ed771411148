//! Account store: trait plus the PostgreSQL implementation.

use async_trait::async_trait;
use sqlx::FromRow;
use tracing::debug;

use super::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{AccountId, StoredCredential, UserView};

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        created_on TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Persistence for accounts.
///
/// Uniqueness of username and email is the store's job and must be enforced
/// atomically with the insert; callers never pre-check.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new account. Fails with [`AppError::DuplicateIdentity`] when
    /// the username or email is taken.
    async fn insert(&self, username: &str, email: &str, password_hash: &str)
        -> AppResult<AccountId>;

    /// All accounts; empty when there are none.
    async fn find_all(&self) -> AppResult<Vec<UserView>>;

    /// Fails with [`AppError::NotFound`] when no account has this id.
    async fn find_by_id(&self, id: AccountId) -> AppResult<UserView>;

    /// The only path that hands a password hash out of the store. Fails with
    /// [`AppError::NotFound`] when the username is unknown.
    async fn find_credential_by_username(&self, username: &str) -> AppResult<StoredCredential>;
}

#[derive(Debug, FromRow)]
struct CredentialRow {
    id: AccountId,
    username: String,
    email: String,
    created_on: chrono::DateTime<chrono::Utc>,
    password: String,
}

impl From<CredentialRow> for StoredCredential {
    fn from(row: CredentialRow) -> Self {
        StoredCredential {
            user: UserView {
                id: row.id,
                username: row.username,
                email: row.email,
                created_on: row.created_on,
            },
            password_hash: row.password,
        }
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    /// Wrap `pool` and make sure the `users` table exists. A failure here is a
    /// startup failure.
    pub async fn new(pool: DbPool) -> AppResult<Self> {
        sqlx::query(CREATE_USERS_TABLE).execute(&pool).await?;
        Ok(Self { pool })
    }
}

/// Split a failed insert into a uniqueness conflict or a plain storage error.
fn classify_insert_error(err: sqlx::Error) -> AppError {
    let is_unique = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION);
    if is_unique {
        AppError::DuplicateIdentity
    } else {
        AppError::Db(err)
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> AppResult<AccountId> {
        let row: (AccountId,) = sqlx::query_as(
            r#"
            INSERT INTO users (username, password, email)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_insert_error)?;
        debug!(id = row.0, %username, "account inserted");
        Ok(row.0)
    }

    async fn find_all(&self) -> AppResult<Vec<UserView>> {
        let rows = sqlx::query_as::<_, UserView>(
            "SELECT id, username, email, created_on FROM users ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: AccountId) -> AppResult<UserView> {
        sqlx::query_as::<_, UserView>(
            "SELECT id, username, email, created_on FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)
    }

    async fn find_credential_by_username(&self, username: &str) -> AppResult<StoredCredential> {
        sqlx::query_as::<_, CredentialRow>(
            "SELECT id, username, email, created_on, password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .map(StoredCredential::from)
        .ok_or(AppError::NotFound)
    }
}
