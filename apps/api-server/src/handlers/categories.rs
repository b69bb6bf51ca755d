//! Category handlers.

use actix_web::{HttpResponse, web};

use quill_core::validation::NewCategory;
use quill_shared::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.categories.list().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// POST /api/categories - admin only
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<NewCategory>,
) -> AppResult<HttpResponse> {
    let category = state
        .categories
        .create(body.into_inner(), &identity.requester())
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(category)))
}
