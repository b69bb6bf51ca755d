//! Category service - listing and admin-only creation.

use std::sync::Arc;

use crate::domain::{Category, Requester};
use crate::error::{DomainError, RepoError};
use crate::policy::AccessPolicy;
use crate::ports::CategoryRepository;
use crate::validation::NewCategory;

pub struct CategoryService {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// All categories, sorted by name.
    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        Ok(self.categories.list_by_name().await?)
    }

    pub async fn create(
        &self,
        input: NewCategory,
        requester: &Requester,
    ) -> Result<Category, DomainError> {
        if matches!(requester, Requester::Anonymous) {
            return Err(DomainError::Unauthorized);
        }
        if !AccessPolicy::can_manage_categories(requester) {
            return Err(DomainError::Forbidden("create categories"));
        }

        let draft = input.validate()?;
        let category = Category::new(draft.name, draft.description);

        let saved = self.categories.insert(category).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                DomainError::Conflict("Category name already exists".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(category_id = %saved.id, name = %saved.name, "Category created");
        Ok(saved)
    }
}
