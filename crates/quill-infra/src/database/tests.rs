use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, Value};
use uuid::Uuid;

use quill_core::domain::{Post, PostStatus, PostUpdate};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostQuery, PostRepository};

use crate::database::entity::post;
use crate::database::postgres_repo::PostgresPostRepository;

fn post_model(id: Uuid, view_count: i64) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        title: "Test Post".to_owned(),
        content: "Content".repeat(10),
        excerpt: "Content...".to_owned(),
        featured_image: None,
        author_id: Uuid::new_v4(),
        category_id: Uuid::new_v4(),
        tags: vec!["rust".to_owned()],
        slug: "test-post-1700000000000".to_owned(),
        status: post::Status::Published,
        published_at: Some(now.into()),
        view_count,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, 3)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.id, post_id);
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.status, PostStatus::Published);
    assert_eq!(post.view_count, 3);
    assert_eq!(post.tags, vec!["rust"]);
}

#[tokio::test]
async fn test_increment_view_count_returns_updated_row() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, 8)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let post = repo.increment_view_count(post_id).await.unwrap().unwrap();
    assert_eq!(post.view_count, 8);

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("UPDATE"));
    assert!(log.contains("RETURNING"));
}

#[tokio::test]
async fn test_increment_view_count_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.increment_view_count(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_publish_keeps_first_published_at() {
    let post_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post_model(post_id, 0)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let update = PostUpdate {
        status: Some(PostStatus::Published),
        ..PostUpdate::empty(Utc::now())
    };
    repo.apply_update(post_id, &update).await.unwrap();

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("COALESCE"));
}

#[tokio::test]
async fn test_list_counts_and_pages() {
    let count_row = BTreeMap::from([("num_items", Value::from(12i64))]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![count_row]])
        .append_query_results([vec![post_model(Uuid::new_v4(), 0)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let query = PostQuery {
        search: Some("Rust".to_owned()),
        status: Some(PostStatus::Published),
        offset: 10,
        limit: 10,
        ..Default::default()
    };
    let (posts, total) = repo.list(&query).await.unwrap();

    assert_eq!(total, 12);
    assert_eq!(posts.len(), 1);

    let log = format!("{:?}", repo.db.into_transaction_log());
    assert!(log.contains("LOWER"));
    assert!(log.contains("ORDER BY"));
}

#[tokio::test]
async fn test_query_errors_are_classified() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("boom".to_owned())])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = repo.find_by_slug("missing").await;
    assert!(matches!(result, Err(RepoError::Query(_))));
}
