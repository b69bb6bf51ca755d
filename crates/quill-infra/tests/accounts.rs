//! Account registration and login with the real token and password services.

use std::sync::Arc;

use quill_core::DomainError;
use quill_core::domain::Role;
use quill_core::ports::TokenService;
use quill_core::services::AccountService;
use quill_core::validation::NewAccount;
use quill_infra::{Argon2PasswordService, InMemoryUserRepository, JwtConfig, JwtTokenService};

fn tokens() -> Arc<JwtTokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "accounts-test-secret".to_string(),
        ..JwtConfig::default()
    }))
}

fn service(tokens: Arc<JwtTokenService>) -> AccountService {
    AccountService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(Argon2PasswordService::new()),
        tokens,
    )
}

fn account(username: &str, email: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        password: "correct horse".to_string(),
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let tokens = tokens();
    let accounts = service(tokens.clone());

    let issued = accounts
        .register(account("ada", "Ada@Example.com"))
        .await
        .unwrap();
    assert_eq!(issued.user.role, Role::User);
    assert_eq!(issued.user.email, "ada@example.com");
    assert_eq!(issued.expires_in, 24 * 3600);

    let claims = tokens.validate_token(&issued.token).unwrap();
    assert_eq!(claims.user_id, issued.user.id);
    assert_eq!(claims.username, "ada");

    let again = accounts
        .login("ada@example.com", "correct horse")
        .await
        .unwrap();
    assert_eq!(again.user.id, issued.user.id);
}

#[tokio::test]
async fn test_login_failures_are_unauthorized() {
    let accounts = service(tokens());
    accounts
        .register(account("ada", "ada@example.com"))
        .await
        .unwrap();

    assert!(matches!(
        accounts.login("ada@example.com", "wrong horse").await,
        Err(DomainError::Unauthorized)
    ));
    assert!(matches!(
        accounts.login("nobody@example.com", "correct horse").await,
        Err(DomainError::Unauthorized)
    ));
}

#[tokio::test]
async fn test_duplicate_accounts_conflict() {
    let accounts = service(tokens());
    accounts
        .register(account("ada", "ada@example.com"))
        .await
        .unwrap();

    assert!(matches!(
        accounts.register(account("ada2", "ada@example.com")).await,
        Err(DomainError::Conflict(_))
    ));
    assert!(matches!(
        accounts.register(account("ada", "other@example.com")).await,
        Err(DomainError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_ensure_admin_is_idempotent() {
    let tokens = tokens();
    let accounts = service(tokens.clone());

    let first = accounts
        .ensure_admin("root", "root@example.com", "admin-password")
        .await
        .unwrap();
    let second = accounts
        .ensure_admin("root", "root@example.com", "admin-password")
        .await
        .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.role, Role::Admin);

    let issued = accounts
        .login("root@example.com", "admin-password")
        .await
        .unwrap();
    let claims = tokens.validate_token(&issued.token).unwrap();
    assert!(claims.requester().is_admin());
}

#[tokio::test]
async fn test_ensure_admin_rejects_regular_account_email() {
    let accounts = service(tokens());

    let regular = accounts
        .register(account("alice", "alice@example.com"))
        .await
        .unwrap();
    assert_eq!(regular.user.role, Role::User);

    assert!(matches!(
        accounts
            .ensure_admin("root", "alice@example.com", "admin-password")
            .await,
        Err(DomainError::Conflict(_))
    ));

    // The existing account keeps its role.
    let profile = accounts.profile(regular.user.id).await.unwrap();
    assert_eq!(profile.role, Role::User);
}
