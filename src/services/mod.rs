//! Business logic: account registration and login.

pub mod user;

pub use user::UserService;
