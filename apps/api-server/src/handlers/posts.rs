//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::PageRequest;
use quill_core::services::PostFilter;
use quill_core::validation::{NewPost, PostChanges, category_filter, status_filter};
use quill_shared::dto::PostListQuery;
use quill_shared::{ApiResponse, Pagination};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Path ids that are not UUIDs cannot name a post.
fn post_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Post not found".to_string()))
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let page_request = PageRequest::new(query.page_number(), query.page_limit());
    let filter = PostFilter {
        search: query.search,
        category_id: category_filter(query.category.as_deref())?,
        status: status_filter(query.status.as_deref())?,
    };

    let page = state
        .posts
        .list(
            filter,
            page_request,
            &identity.requester(),
        )
        .await?;

    let pagination = Pagination {
        page: page.page,
        total_pages: page.total_pages(),
        total: page.total,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::paged(page.items, pagination)))
}

/// GET /api/posts/{id} - also accepts a slug
pub async fn get_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .get_one(&path.into_inner(), &identity.requester())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<NewPost>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .create(body.into_inner(), &identity.requester())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(post)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<PostChanges>,
) -> AppResult<HttpResponse> {
    let id = post_id(&path)?;
    let post = state
        .posts
        .update(id, body.into_inner(), &identity.requester())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = post_id(&path)?;
    state.posts.delete(id, &identity.requester()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::message("Post deleted successfully")))
}
