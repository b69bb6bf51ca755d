use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Category, Post, PostStatus, PostUpdate, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique index violations surface as `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Filter and window for a post listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Case-insensitive substring matched against title or content.
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<PostStatus>,
    pub offset: u64,
    pub limit: u64,
}

/// Post repository. Slugs are unique; partial updates are atomic per post.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError>;

    /// Matching posts, newest first, windowed by offset/limit, plus the
    /// total number of matches.
    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError>;

    /// Add one to the view counter and return the updated post.
    async fn increment_view_count(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Merge `update` into the stored post (see `Post::apply_update`).
    async fn apply_update(&self, id: Uuid, update: &PostUpdate)
    -> Result<Option<Post>, RepoError>;
}

/// Category repository. Names are unique.
#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, Uuid> {
    /// All categories ordered by name.
    async fn list_by_name(&self) -> Result<Vec<Category>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError>;
}

/// User repository with domain-specific methods. Emails and usernames are unique.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}
