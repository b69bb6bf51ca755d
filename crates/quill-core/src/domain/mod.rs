//! Domain entities - the core business objects.

mod category;
mod page;
mod post;
mod requester;
mod user;

pub use category::Category;
pub use page::{DEFAULT_PAGE_LIMIT, Page, PageRequest};
pub use post::{
    AuthorSummary, CategorySummary, EXCERPT_SOURCE_CHARS, Post, PostDetails, PostDraft, PostStatus,
    PostUpdate, derive_excerpt, derive_slug, slugify,
};
pub use requester::Requester;
pub use user::{Role, User};
