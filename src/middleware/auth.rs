//! Auth middleware: bearer token check for protected routes.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::auth::TokenIssuer;
use crate::error::AppError;
use crate::handlers::http::AppState;
use crate::models::AccountId;

const BEARER_PREFIX: &str = "Bearer ";

/// Account id resolved from a verified bearer token. Inserted into request
/// extensions by [`require_auth`]; handlers take it as an extractor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthUser(pub AccountId);

/// Resolve the caller from the `Authorization` header. Every failure is
/// [`AppError::Unauthorized`]; the cause is only logged.
pub fn authenticate(headers: &HeaderMap, tokens: &TokenIssuer) -> Result<AuthUser, AppError> {
    let header = headers.get(AUTHORIZATION).ok_or_else(|| {
        debug!("rejected request: missing Authorization header");
        AppError::Unauthorized
    })?;

    let token = header
        .to_str()
        .ok()
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            debug!("rejected request: Authorization header is not a bearer token");
            AppError::Unauthorized
        })?;

    let id = tokens
        .verify(token)
        .map_err(|_| AppError::Unauthorized)?;
    Ok(AuthUser(id))
}

/// Middleware: reject unauthenticated requests, otherwise attach [`AuthUser`].
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate(request.headers(), state.tokens())?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::{Duration, Utc};

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test-jwt-secret-min-32-chars!!").unwrap()
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_unauthorized() {
        let res = authenticate(&HeaderMap::new(), &issuer());
        assert!(matches!(res, Err(AppError::Unauthorized)));
    }

    #[test]
    fn garbled_token_is_unauthorized() {
        let res = authenticate(&headers_with("Bearer abc.def.ghi"), &issuer());
        assert!(matches!(res, Err(AppError::Unauthorized)));
    }

    #[test]
    fn wrong_scheme_is_unauthorized() {
        let tokens = issuer();
        let pair = tokens.issue(1).unwrap();
        let res = authenticate(&headers_with(&format!("Basic {}", pair.access_token)), &tokens);
        assert!(matches!(res, Err(AppError::Unauthorized)));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let tokens = issuer();
        let pair = tokens.issue_at(1, Utc::now() - Duration::hours(1)).unwrap();
        let res = authenticate(&headers_with(&format!("Bearer {}", pair.access_token)), &tokens);
        assert!(matches!(res, Err(AppError::Unauthorized)));
    }

    #[test]
    fn valid_token_resolves_account() {
        let tokens = issuer();
        let pair = tokens.issue(1).unwrap();
        let user =
            authenticate(&headers_with(&format!("Bearer {}", pair.access_token)), &tokens).unwrap();
        assert_eq!(user, AuthUser(1));
    }
}
