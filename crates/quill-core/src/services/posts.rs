//! Post store - lifecycle of posts on top of the injected repositories.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{Page, PageRequest, Post, PostDetails, PostStatus, Requester};
use crate::error::{DomainError, RepoError};
use crate::policy::AccessPolicy;
use crate::ports::{CategoryRepository, PostQuery, PostRepository, UserRepository};
use crate::validation::{NewPost, PostChanges};

const ENTITY: &str = "Post";

/// Listing filter as requested by the caller.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub search: Option<String>,
    pub category_id: Option<Uuid>,
    pub status: Option<PostStatus>,
}

/// Creates, reads, updates and deletes posts, consulting [`AccessPolicy`]
/// before mutating anything.
pub struct PostStore {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostStore {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        categories: Arc<dyn CategoryRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            posts,
            categories,
            users,
        }
    }

    /// Newest-first page of posts visible to the requester.
    pub async fn list(
        &self,
        filter: PostFilter,
        page: PageRequest,
        requester: &Requester,
    ) -> Result<Page<PostDetails>, DomainError> {
        let status = AccessPolicy::visible_status_filter(requester).resolve(filter.status);
        let query = PostQuery {
            search: filter
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category_id: filter.category_id,
            status,
            offset: page.offset(),
            limit: page.limit,
        };

        let (posts, total) = self.posts.list(&query).await?;
        tracing::debug!(
            total,
            returned = posts.len(),
            page = page.page,
            status = ?status,
            "Listed posts"
        );

        Ok(Page {
            items: self.populate(posts).await?,
            page: page.page,
            limit: page.limit,
            total,
        })
    }

    /// Fetch a post by id or slug and count the view.
    ///
    /// Keys that parse as a UUID are looked up by id, anything else by slug.
    /// Draft posts are returned to any requester.
    pub async fn get_one(
        &self,
        id_or_slug: &str,
        _requester: &Requester,
    ) -> Result<PostDetails, DomainError> {
        let found = match Uuid::parse_str(id_or_slug) {
            Ok(id) => self.posts.find_by_id(id).await?,
            Err(_) => self.posts.find_by_slug(id_or_slug).await?,
        };
        let post = found.ok_or_else(|| DomainError::not_found(ENTITY, id_or_slug))?;

        // The post may have been deleted between lookup and increment.
        let viewed = self
            .posts
            .increment_view_count(post.id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id_or_slug))?;

        self.populate_one(viewed).await
    }

    pub async fn create(
        &self,
        input: NewPost,
        requester: &Requester,
    ) -> Result<PostDetails, DomainError> {
        let author_id = requester.user_id().ok_or(DomainError::Unauthorized)?;
        let draft = input.validate()?;
        self.ensure_category_exists(draft.category_id).await?;

        let post = Post::create(author_id, draft, Utc::now());
        let saved = self.posts.insert(post).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                DomainError::Conflict("A post with this slug already exists".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(post_id = %saved.id, slug = %saved.slug, author_id = %author_id, "Post created");
        self.populate_one(saved).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        changes: PostChanges,
        requester: &Requester,
    ) -> Result<PostDetails, DomainError> {
        let post = self.load_writable(id, requester, "update this post").await?;

        let update = changes.validate(Utc::now())?;
        if let Some(category_id) = update.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let updated = self
            .posts
            .apply_update(id, &update)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        if !post.is_published() && updated.is_published() {
            tracing::info!(post_id = %id, published_at = ?updated.published_at, "Post published");
        }
        tracing::debug!(post_id = %id, "Post updated");
        self.populate_one(updated).await
    }

    pub async fn delete(&self, id: Uuid, requester: &Requester) -> Result<(), DomainError> {
        self.load_writable(id, requester, "delete this post").await?;

        self.posts.delete(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::not_found(ENTITY, id),
            other => other.into(),
        })?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    /// Load a post and check that the requester may change it.
    async fn load_writable(
        &self,
        id: Uuid,
        requester: &Requester,
        action: &'static str,
    ) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY, id))?;

        if matches!(requester, Requester::Anonymous) {
            return Err(DomainError::Unauthorized);
        }
        if !AccessPolicy::can_write(requester, &post) {
            tracing::warn!(post_id = %id, requester = ?requester.user_id(), "Write denied");
            return Err(DomainError::Forbidden(action));
        }

        Ok(post)
    }

    async fn ensure_category_exists(&self, category_id: Uuid) -> Result<(), DomainError> {
        match self.categories.find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::invalid(
                "category",
                "Valid category ID is required",
            )),
        }
    }

    async fn populate_one(&self, post: Post) -> Result<PostDetails, DomainError> {
        let mut details = self.populate(vec![post]).await?;
        details
            .pop()
            .ok_or_else(|| DomainError::Internal("populate dropped a post".to_string()))
    }

    /// Resolve author and category references to their display names.
    async fn populate(&self, posts: Vec<Post>) -> Result<Vec<PostDetails>, DomainError> {
        if posts.is_empty() {
            return Ok(Vec::new());
        }

        let mut author_ids: Vec<Uuid> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();
        let mut category_ids: Vec<Uuid> = posts.iter().map(|p| p.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let usernames: HashMap<Uuid, String> = self
            .users
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();
        let category_names: HashMap<Uuid, String> = self
            .categories
            .find_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = usernames.get(&post.author_id).cloned();
                let category = category_names.get(&post.category_id).cloned();
                PostDetails::new(post, author, category)
            })
            .collect())
    }
}
