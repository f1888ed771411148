//! Password hashing and verification (Argon2id, default cost).

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tracing::debug;

/// Hash `password` with a fresh random salt into a PHC string.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Hashing(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Check `password` against a stored PHC string. A malformed digest is a
/// mismatch, not an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            debug!(error = %e, "stored password hash is malformed");
            return false;
        }
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// [`hash_password`] off the async workers.
pub async fn hash_password_blocking(password: String) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Hashing(e.to_string()))?
}

/// [`verify_password`] off the async workers. A failed task counts as a
/// mismatch.
pub async fn verify_password_blocking(password: String, hash: String) -> bool {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "password verification task failed");
            false
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("mypassword").unwrap();
        assert!(verify_password("mypassword", &hash));
        assert!(!verify_password("wrongpassword", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("hunter2pass").unwrap();
        let b = hash_password("hunter2pass").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("hunter2pass", &a));
        assert!(verify_password("hunter2pass", &b));
    }

    #[test]
    fn malformed_digest_is_a_mismatch() {
        assert!(!verify_password("mypassword", "not-a-phc-string"));
        assert!(!verify_password("mypassword", ""));
    }

    #[tokio::test]
    async fn blocking_wrappers_agree() {
        let hash = hash_password_blocking("mypassword".into()).await.unwrap();
        assert!(verify_password_blocking("mypassword".into(), hash.clone()).await);
        assert!(!verify_password_blocking("other-password".into(), hash).await);
    }
}
