//! HTTP handlers: health, account lookups, shared state.

pub mod http;
pub mod users;

pub use http::{health, AppState};
pub use users::{get_user, list_users};
