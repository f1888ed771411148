//! JWT issue and validation.
//!
//! Tokens are HS256-signed and stateless: nothing is recorded server-side,
//! so a token with a valid signature is accepted until its `exp` passes.
//! There is no revocation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AppError, AppResult};
use crate::models::AccountId;

/// Access token lifetime: 15 minutes.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // account id
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

/// Access/refresh pair minted at login over the same subject.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs and verifies bearer tokens with the process-wide secret.
///
/// Built once at startup from [`Config`](crate::config::Config) and cloned
/// into request state; the keys are never mutated afterwards.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    validation: Arc<Validation>,
}

impl TokenIssuer {
    pub fn new(secret: &str) -> AppResult<Self> {
        if secret.is_empty() {
            return Err(AppError::Config("JWT secret is empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand so the comparison is strict and the clock injectable.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            validation: Arc::new(validation),
        })
    }

    pub fn issue(&self, account_id: AccountId) -> AppResult<TokenPair> {
        self.issue_at(account_id, Utc::now())
    }

    pub fn issue_at(&self, account_id: AccountId, now: DateTime<Utc>) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.sign(account_id, now, ACCESS_TOKEN_TTL_SECS)?,
            refresh_token: self.sign(account_id, now, REFRESH_TOKEN_TTL_SECS)?,
        })
    }

    fn sign(&self, account_id: AccountId, now: DateTime<Utc>, ttl_secs: i64) -> AppResult<String> {
        let claims = Claims {
            sub: account_id.to_string(),
            exp: now.timestamp() + ttl_secs,
            iat: now.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::Signing(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> AppResult<AccountId> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as of `now`. Every failure collapses into
    /// [`AppError::InvalidToken`]; the reason is only logged.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<AccountId> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            debug!(error = %e, "token rejected");
            AppError::InvalidToken
        })?;

        if now.timestamp() > data.claims.exp {
            debug!(exp = data.claims.exp, "token expired");
            return Err(AppError::InvalidToken);
        }

        data.claims.sub.parse::<AccountId>().map_err(|_| {
            debug!(sub = %data.claims.sub, "token subject is not an account id");
            AppError::InvalidToken
        })
    }
}
