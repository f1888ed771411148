//! Database layer: pool and the account store.

mod memory;
mod pool;
mod repositories;

pub use memory::MemoryUserStore;
pub use pool::{create_pool, DbPool};
pub use repositories::{PgUserStore, UserStore};
