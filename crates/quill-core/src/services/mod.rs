//! Application services - use cases built on the ports.

mod accounts;
mod categories;
mod posts;

pub use accounts::{AccountService, IssuedToken};
pub use categories::CategoryService;
pub use posts::{PostFilter, PostStore};
