use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, PostUpdate};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostQuery, PostRepository};

/// In-memory post store with a unique slug index.
#[derive(Default)]
pub struct InMemoryPostRepository {
    store: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(post: &Post, query: &PostQuery, needle: Option<&str>) -> bool {
        if query.status.is_some_and(|s| s != post.status) {
            return false;
        }
        if query.category_id.is_some_and(|c| c != post.category_id) {
            return false;
        }
        match needle {
            Some(needle) => {
                post.title.to_lowercase().contains(needle)
                    || post.content.to_lowercase().contains(needle)
            }
            None => true,
        }
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&post.id) {
            return Err(RepoError::Constraint("duplicate post id".to_string()));
        }
        if store.values().any(|p| p.slug == post.slug) {
            return Err(RepoError::Constraint(format!(
                "duplicate slug: {}",
                post.slug
            )));
        }

        store.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|p| p.slug == slug).cloned())
    }

    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError> {
        let needle = query.search.as_ref().map(|s| s.to_lowercase());
        let store = self.store.read().await;

        let mut matching: Vec<&Post> = store
            .values()
            .filter(|p| Self::matches(p, query, needle.as_deref()))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(query.offset as usize)
            .take(query.limit as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&id).map(|post| {
            post.view_count += 1;
            post.clone()
        }))
    }

    async fn apply_update(
        &self,
        id: Uuid,
        update: &PostUpdate,
    ) -> Result<Option<Post>, RepoError> {
        let mut store = self.store.write().await;
        Ok(store.get_mut(&id).map(|post| {
            post.apply_update(update);
            post.clone()
        }))
    }
}
