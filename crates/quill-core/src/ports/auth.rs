//! Authentication and authorization ports.

use uuid::Uuid;

use crate::domain::{Requester, Role};

/// Claims carried by an access token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
    pub exp: i64,
}

impl TokenClaims {
    /// The highest role named in the token; unknown roles are ignored.
    pub fn role(&self) -> Role {
        if self.roles.iter().any(|r| Role::parse(r) == Some(Role::Admin)) {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn requester(&self) -> Requester {
        Requester::Authenticated {
            user_id: self.user_id,
            role: self.role(),
        }
    }
}

/// Token service trait for bearer token operations.
pub trait TokenService: Send + Sync {
    /// Issue an access token for a user.
    fn generate_token(&self, user_id: Uuid, username: &str, role: Role)
    -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}

impl From<AuthError> for crate::error::DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::HashingError(msg) => crate::error::DomainError::Internal(msg),
            _ => crate::error::DomainError::Unauthorized,
        }
    }
}
