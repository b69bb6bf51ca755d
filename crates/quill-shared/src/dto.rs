//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Issued access token plus the account it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Query string accepted by the post listing.
///
/// `page` and `limit` are kept as raw text; values that are empty or not a
/// number fall back to the listing defaults instead of failing the request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
}

impl PostListQuery {
    pub fn page_number(&self) -> Option<i64> {
        lenient_int(self.page.as_deref())
    }

    pub fn page_limit(&self) -> Option<i64> {
        lenient_int(self.limit.as_deref())
    }
}

fn lenient_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>) -> PostListQuery {
        PostListQuery {
            page: page.map(String::from),
            limit: limit.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_paging_params_parse_leniently() {
        let q = query(Some("3"), Some(" 25 "));
        assert_eq!(q.page_number(), Some(3));
        assert_eq!(q.page_limit(), Some(25));

        let q = query(Some(""), Some("abc"));
        assert_eq!(q.page_number(), None);
        assert_eq!(q.page_limit(), None);

        let q = query(Some("-2"), None);
        assert_eq!(q.page_number(), Some(-2));
        assert_eq!(q.page_limit(), None);
    }
}
