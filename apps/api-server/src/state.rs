//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{
    CategoryRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use quill_core::services::{AccountService, CategoryService, PostStore};
use quill_infra::{
    Argon2PasswordService, InMemoryCategoryRepository, InMemoryPostRepository,
    InMemoryUserRepository,
};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use anyhow::Context;
#[cfg(feature = "postgres")]
use quill_infra::{
    DatabaseConfig, PostgresCategoryRepository, PostgresPostRepository, PostgresUserRepository,
    database::connect,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostStore>,
    pub categories: Arc<CategoryService>,
    pub accounts: Arc<AccountService>,
    /// Which backend holds the data, reported by the health check.
    pub storage: &'static str,
}

struct Repositories {
    posts: Arc<dyn PostRepository>,
    categories: Arc<dyn CategoryRepository>,
    users: Arc<dyn UserRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            categories: Arc::new(InMemoryCategoryRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig, tokens: Arc<dyn TokenService>) -> anyhow::Result<Self> {
        #[cfg(feature = "postgres")]
        let (repos, storage) = match &config.database {
            Some(settings) => {
                let db = connect(&DatabaseConfig {
                    url: settings.url.clone(),
                    max_connections: settings.max_connections,
                    min_connections: settings.min_connections,
                })
                .await
                .context("failed to connect to database")?;

                let repos = Repositories {
                    posts: Arc::new(PostgresPostRepository::new(db.clone())),
                    categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
                    users: Arc::new(PostgresUserRepository::new(db)),
                };
                (repos, "postgres")
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (Repositories::in_memory(), "memory")
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (repos, storage) = {
            if config.database.is_some() {
                tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
            }
            (Repositories::in_memory(), "memory")
        };

        let state = Self::assemble(repos, tokens, storage);
        tracing::info!(storage, "Application state initialized");
        Ok(state)
    }

    /// Fresh in-memory state.
    pub fn in_memory(tokens: Arc<dyn TokenService>) -> Self {
        Self::assemble(Repositories::in_memory(), tokens, "memory")
    }

    fn assemble(repos: Repositories, tokens: Arc<dyn TokenService>, storage: &'static str) -> Self {
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        Self {
            posts: Arc::new(PostStore::new(
                repos.posts,
                repos.categories.clone(),
                repos.users.clone(),
            )),
            categories: Arc::new(CategoryService::new(repos.categories)),
            accounts: Arc::new(AccountService::new(repos.users, passwords, tokens)),
            storage,
        }
    }
}
