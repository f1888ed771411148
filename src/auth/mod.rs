//! Authentication: password hashing, JWT, register/login handlers.

mod handlers;
mod jwt;
pub mod password;

pub use handlers::{login, logout, register};
pub use jwt::{Claims, TokenIssuer, TokenPair, ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS};
