//! Account registration, password login and bearer-token access control.
//!
//! Accounts live in PostgreSQL behind [`db::UserStore`]; passwords are
//! Argon2-hashed; login issues HS256 access/refresh JWTs that
//! [`middleware::require_auth`] checks on protected routes.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::UserService;

use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

/// Build the API router (auth, users, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let protected = axum::Router::new()
        .route("/users", get(handlers::list_users))
        .route("/users/:id", get(handlers::get_user))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/health", get(handlers::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
