//! Account service - registration, login and admin bootstrap.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Role, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, TokenService, UserRepository};
use crate::validation::{NewAccount, normalize_email};

/// A freshly issued bearer token and its owner.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Create a regular account and sign it in.
    pub async fn register(&self, input: NewAccount) -> Result<IssuedToken, DomainError> {
        let draft = input.validate()?;

        if self.users.find_by_email(&draft.email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".to_string()));
        }
        if self.users.find_by_username(&draft.username).await?.is_some() {
            return Err(DomainError::Conflict("Username already taken".to_string()));
        }

        let password_hash = self.passwords.hash(&draft.password)?;
        let user = User::new(draft.username, draft.email, password_hash, Role::User);
        let saved = self.insert(user).await?;

        tracing::info!(user_id = %saved.id, username = %saved.username, "User registered");
        self.issue(saved)
    }

    /// Exchange credentials for a token. Unknown emails and wrong passwords
    /// are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken, DomainError> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::Unauthorized);
        }

        self.issue(user)
    }

    pub async fn profile(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id))
    }

    /// Make sure an admin account exists for `email`, creating it if needed.
    /// Fails if the email is already taken by a non-admin account.
    pub async fn ensure_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        let draft = NewAccount {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
        .validate()?;

        if let Some(existing) = self.users.find_by_email(&draft.email).await? {
            if existing.role != Role::Admin {
                tracing::error!(user_id = %existing.id, "Bootstrap email belongs to a non-admin account");
                return Err(DomainError::Conflict(format!(
                    "{} belongs to an account without the admin role",
                    draft.email
                )));
            }
            return Ok(existing);
        }

        let password_hash = self.passwords.hash(&draft.password)?;
        let admin = self
            .insert(User::new(draft.username, draft.email, password_hash, Role::Admin))
            .await?;
        tracing::info!(user_id = %admin.id, "Admin account created");
        Ok(admin)
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        self.users.insert(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::Conflict("Account already exists".to_string()),
            other => other.into(),
        })
    }

    fn issue(&self, user: User) -> Result<IssuedToken, DomainError> {
        let token = self
            .tokens
            .generate_token(user.id, &user.username, user.role)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(IssuedToken {
            token,
            expires_in: self.tokens.expiration_seconds(),
            user,
        })
    }
}
