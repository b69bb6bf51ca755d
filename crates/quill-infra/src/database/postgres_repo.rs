//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use quill_core::domain::{Category, Post, PostStatus, PostUpdate, User};
use quill_core::error::RepoError;
use quill_core::ports::{CategoryRepository, PostQuery, PostRepository, UserRepository};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL category repository.
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;

/// Mask the local part of an email so logs carry no PII.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***@{domain}"),
            _ => format!("***@{domain}"),
        },
        None => "***".to_string(),
    }
}

/// Escape LIKE wildcards so user input matches literally.
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn lower_like(column: post::Column, pattern: &str) -> SimpleExpr {
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn list_by_name(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list(&self, query: &PostQuery) -> Result<(Vec<Post>, u64), RepoError> {
        let mut select = PostEntity::find();
        if let Some(status) = query.status {
            select = select.filter(post::Column::Status.eq(post::Status::from(status)));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(post::Column::CategoryId.eq(category_id));
        }
        if let Some(search) = &query.search {
            let pattern = like_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(lower_like(post::Column::Title, &pattern))
                    .add(lower_like(post::Column::Content, &pattern)),
            );
        }

        let total = select.clone().count(&self.db).await.map_err(map_db_err)?;
        let models = select
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(query.offset)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok((models.into_iter().map(Into::into).collect(), total))
    }

    async fn increment_view_count(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let updated = PostEntity::update_many()
            .col_expr(
                post::Column::ViewCount,
                Expr::col(post::Column::ViewCount).add(1),
            )
            .filter(post::Column::Id.eq(id))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn apply_update(
        &self,
        id: Uuid,
        update: &PostUpdate,
    ) -> Result<Option<Post>, RepoError> {
        let now: DateTimeWithTimeZone = update.updated_at.into();
        let mut stmt = PostEntity::update_many()
            .col_expr(post::Column::UpdatedAt, Expr::value(now))
            .filter(post::Column::Id.eq(id));

        if let Some(title) = &update.title {
            stmt = stmt.col_expr(post::Column::Title, Expr::value(title.clone()));
        }
        if let Some(content) = &update.content {
            stmt = stmt.col_expr(post::Column::Content, Expr::value(content.clone()));
        }
        if let Some(excerpt) = &update.excerpt {
            stmt = stmt.col_expr(post::Column::Excerpt, Expr::value(excerpt.clone()));
        }
        if let Some(image) = &update.featured_image {
            stmt = stmt.col_expr(post::Column::FeaturedImage, Expr::value(image.clone()));
        }
        if let Some(category_id) = update.category_id {
            stmt = stmt.col_expr(post::Column::CategoryId, Expr::value(category_id));
        }
        if let Some(tags) = &update.tags {
            stmt = stmt.col_expr(post::Column::Tags, Expr::value(tags.clone()));
        }
        if let Some(status) = update.status {
            stmt = stmt.col_expr(post::Column::Status, Expr::value(post::Status::from(status)));
        }
        if update.status == Some(PostStatus::Published) {
            // Keep the first publication instant.
            stmt = stmt.col_expr(
                post::Column::PublishedAt,
                Func::coalesce([Expr::col(post::Column::PublishedAt).into(), Expr::value(now)])
                    .into(),
            );
        }

        let updated = stmt.exec_with_returning(&self.db).await.map_err(map_db_err)?;
        Ok(updated.into_iter().next().map(Into::into))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("nobody"), "***");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Rust"), "%rust%");
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
    }
}
