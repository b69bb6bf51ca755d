//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::User;
use quill_core::services::IssuedToken;
use quill_core::validation::NewAccount;
use quill_shared::ApiResponse;
use quill_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        created_at: user.created_at.to_rfc3339(),
    }
}

fn auth_response(issued: IssuedToken) -> AuthResponse {
    AuthResponse {
        user: user_response(&issued.user),
        token: issued.token,
        token_type: "Bearer".to_string(),
        expires_in: u64::try_from(issued.expires_in).unwrap_or_default(),
    }
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let issued = state
        .accounts
        .register(NewAccount {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(auth_response(issued))))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let issued = state.accounts.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(auth_response(issued))))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    tracing::debug!(user_id = %identity.user_id, username = %identity.username, "Profile requested");
    let user = state.accounts.profile(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user_response(&user))))
}
