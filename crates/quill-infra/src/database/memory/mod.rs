//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Each repository keeps its documents in a `HashMap` behind an async
//! `RwLock`; every mutation happens under the write lock, which makes
//! per-document updates atomic. Data is lost on process restart.

mod categories;
mod posts;
mod users;

pub use categories::InMemoryCategoryRepository;
pub use posts::InMemoryPostRepository;
pub use users::InMemoryUserRepository;
