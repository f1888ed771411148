//! Request middleware: the bearer-token gate in front of protected routes.

pub mod auth;

pub use auth::{authenticate, require_auth, AuthUser};
