//! Domain models: accounts and the request/response shapes around them.

pub mod user;

pub use user::{
    AccountId, LoginRequest, LoginResponse, LogoutResponse, RegisterRequest, RegisterResponse,
    StoredCredential, UserView,
};
