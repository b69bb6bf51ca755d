//! Input validation for posts and categories.
//!
//! Raw inputs arrive as loosely typed strings; validation trims them, checks
//! field constraints and collects every violation before failing.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{PostDraft, PostStatus, PostUpdate};
use crate::error::{DomainError, FieldError};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 200;
pub const CONTENT_MIN_CHARS: usize = 50;
pub const EXCERPT_MAX_CHARS: usize = 300;
pub const CATEGORY_NAME_MIN_CHARS: usize = 2;
pub const CATEGORY_NAME_MAX_CHARS: usize = 50;
pub const CATEGORY_DESCRIPTION_MAX_CHARS: usize = 200;
pub const USERNAME_MIN_CHARS: usize = 3;
pub const USERNAME_MAX_CHARS: usize = 30;
pub const PASSWORD_MIN_CHARS: usize = 8;

const TITLE_MESSAGE: &str = "Title must be between 5 and 200 characters";
const CONTENT_MESSAGE: &str = "Content must be at least 50 characters long";
const EXCERPT_MESSAGE: &str = "Excerpt cannot exceed 300 characters";
const CATEGORY_MESSAGE: &str = "Valid category ID is required";
const STATUS_MESSAGE: &str = "Status must be either draft or published";

/// Raw fields for a new post.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    #[serde(default)]
    pub category: String,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Raw fields for a partial post update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<String>,
}

/// Raw fields for a new category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCategory {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// Raw fields for a new account.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAccount {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Validated account fields. The email is lowercased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountDraft {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Validated category fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: Option<String>,
}

/// Collects field errors so one response can report all of them.
#[derive(Debug, Default)]
struct Violations(Vec<FieldError>);

impl Violations {
    fn note<T>(&mut self, field: &str, outcome: &Result<T, &'static str>) {
        if let Err(message) = outcome {
            self.0.push(FieldError::new(field, *message));
        }
    }

    fn into_error(self) -> DomainError {
        DomainError::Validation(self.0)
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn title(raw: &str) -> Result<String, &'static str> {
    let title = raw.trim();
    let len = char_len(title);
    if (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        Ok(title.to_string())
    } else {
        Err(TITLE_MESSAGE)
    }
}

fn content(raw: &str) -> Result<String, &'static str> {
    let content = raw.trim();
    if char_len(content) >= CONTENT_MIN_CHARS {
        Ok(content.to_string())
    } else {
        Err(CONTENT_MESSAGE)
    }
}

/// Blank excerpts count as absent.
fn excerpt(raw: Option<&str>) -> Result<Option<String>, &'static str> {
    match raw.filter(|e| !e.trim().is_empty()) {
        None => Ok(None),
        Some(e) if char_len(e) <= EXCERPT_MAX_CHARS => Ok(Some(e.to_string())),
        Some(_) => Err(EXCERPT_MESSAGE),
    }
}

fn category(raw: &str) -> Result<Uuid, &'static str> {
    Uuid::parse_str(raw.trim()).map_err(|_| CATEGORY_MESSAGE)
}

fn status(raw: &str) -> Result<PostStatus, &'static str> {
    PostStatus::parse(raw.trim()).ok_or(STATUS_MESSAGE)
}

fn featured_image(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn tags(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parse a status filter from a query string.
pub fn status_filter(raw: Option<&str>) -> Result<Option<PostStatus>, DomainError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => status(s)
            .map(Some)
            .map_err(|message| DomainError::invalid("status", message)),
    }
}

/// Parse a category filter from a query string.
pub fn category_filter(raw: Option<&str>) -> Result<Option<Uuid>, DomainError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => category(s)
            .map(Some)
            .map_err(|message| DomainError::invalid("category", message)),
    }
}

impl NewPost {
    pub fn validate(self) -> Result<PostDraft, DomainError> {
        let title = title(&self.title);
        let content = content(&self.content);
        let excerpt = excerpt(self.excerpt.as_deref());
        let category_id = category(&self.category);
        let status = self.status.as_deref().map(status).unwrap_or(Ok(PostStatus::default()));

        let mut violations = Violations::default();
        violations.note("title", &title);
        violations.note("content", &content);
        violations.note("excerpt", &excerpt);
        violations.note("category", &category_id);
        violations.note("status", &status);

        match (title, content, excerpt, category_id, status) {
            (Ok(title), Ok(content), Ok(excerpt), Ok(category_id), Ok(status)) => Ok(PostDraft {
                title,
                content,
                excerpt,
                featured_image: featured_image(self.featured_image.as_deref()),
                category_id,
                tags: tags(self.tags.unwrap_or_default()),
                status,
            }),
            _ => Err(violations.into_error()),
        }
    }
}

impl PostChanges {
    /// Validate the supplied fields only; absent fields stay untouched.
    pub fn validate(self, now: DateTime<Utc>) -> Result<PostUpdate, DomainError> {
        let title = self.title.as_deref().map(title).transpose();
        let content = self.content.as_deref().map(content).transpose();
        let excerpt = excerpt(self.excerpt.as_deref());
        let category_id = self.category.as_deref().map(category).transpose();
        let status = self.status.as_deref().map(status).transpose();

        let mut violations = Violations::default();
        violations.note("title", &title);
        violations.note("content", &content);
        violations.note("excerpt", &excerpt);
        violations.note("category", &category_id);
        violations.note("status", &status);

        match (title, content, excerpt, category_id, status) {
            (Ok(title), Ok(content), Ok(excerpt), Ok(category_id), Ok(status)) => Ok(PostUpdate {
                title,
                content,
                excerpt,
                featured_image: featured_image(self.featured_image.as_deref()),
                category_id,
                tags: self.tags.map(tags),
                status,
                updated_at: now,
            }),
            _ => Err(violations.into_error()),
        }
    }
}

impl NewCategory {
    pub fn validate(self) -> Result<CategoryDraft, DomainError> {
        let mut violations = Violations::default();

        let name = self.name.trim();
        let name_len = char_len(name);
        if !(CATEGORY_NAME_MIN_CHARS..=CATEGORY_NAME_MAX_CHARS).contains(&name_len) {
            violations
                .0
                .push(FieldError::new("name", "Name must be between 2 and 50 characters"));
        }

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        if description
            .as_deref()
            .is_some_and(|d| char_len(d) > CATEGORY_DESCRIPTION_MAX_CHARS)
        {
            violations.0.push(FieldError::new(
                "description",
                "Description cannot exceed 200 characters",
            ));
        }

        if !violations.0.is_empty() {
            return Err(violations.into_error());
        }

        Ok(CategoryDraft {
            name: name.to_string(),
            description,
        })
    }
}

impl NewAccount {
    pub fn validate(self) -> Result<AccountDraft, DomainError> {
        let mut violations = Violations::default();

        let username = self.username.trim();
        if !(USERNAME_MIN_CHARS..=USERNAME_MAX_CHARS).contains(&char_len(username)) {
            violations.0.push(FieldError::new(
                "username",
                "Username must be between 3 and 30 characters",
            ));
        }

        let email = normalize_email(&self.email);
        if !is_plausible_email(&email) {
            violations
                .0
                .push(FieldError::new("email", "Please provide a valid email"));
        }

        if char_len(&self.password) < PASSWORD_MIN_CHARS {
            violations.0.push(FieldError::new(
                "password",
                "Password must be at least 8 characters",
            ));
        }

        if !violations.0.is_empty() {
            return Err(violations.into_error());
        }

        Ok(AccountDraft {
            username: username.to_string(),
            email,
            password: self.password,
        })
    }
}

/// Emails are compared trimmed and lowercased.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !email.contains(' '),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_post() -> NewPost {
        NewPost {
            title: "  A Valid Title Here  ".to_string(),
            content: "x".repeat(60),
            category: Uuid::new_v4().to_string(),
            ..Default::default()
        }
    }

    fn fields(err: DomainError) -> Vec<String> {
        match err {
            DomainError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_post_defaults() {
        let draft = valid_post().validate().unwrap();
        assert_eq!(draft.title, "A Valid Title Here");
        assert_eq!(draft.status, PostStatus::Draft);
        assert!(draft.tags.is_empty());
        assert_eq!(draft.excerpt, None);
    }

    #[test]
    fn test_short_content_is_rejected() {
        let input = NewPost {
            content: "x".repeat(49),
            ..valid_post()
        };
        assert_eq!(fields(input.validate().unwrap_err()), vec!["content"]);
    }

    #[test]
    fn test_content_length_ignores_surrounding_whitespace() {
        let input = NewPost {
            content: format!("   {}   ", "x".repeat(49)),
            ..valid_post()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_all_violations_are_reported() {
        let input = NewPost {
            title: "abc".to_string(),
            content: "short".to_string(),
            excerpt: Some("e".repeat(301)),
            category: "not-an-id".to_string(),
            status: Some("archived".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fields(input.validate().unwrap_err()),
            vec!["title", "content", "excerpt", "category", "status"]
        );
    }

    #[test]
    fn test_title_bounds() {
        let too_long = NewPost {
            title: "t".repeat(201),
            ..valid_post()
        };
        assert!(too_long.validate().is_err());

        let max = NewPost {
            title: "t".repeat(200),
            ..valid_post()
        };
        assert!(max.validate().is_ok());
    }

    #[test]
    fn test_tags_are_trimmed() {
        let input = NewPost {
            tags: Some(vec![" rust ".to_string(), "".to_string(), "web".to_string()]),
            ..valid_post()
        };
        assert_eq!(input.validate().unwrap().tags, vec!["rust", "web"]);
    }

    #[test]
    fn test_changes_validate_only_supplied_fields() {
        let now = Utc::now();
        let update = PostChanges {
            status: Some("published".to_string()),
            ..Default::default()
        }
        .validate(now)
        .unwrap();

        assert_eq!(update.status, Some(PostStatus::Published));
        assert_eq!(update.title, None);
        assert_eq!(update.updated_at, now);

        let err = PostChanges {
            content: Some("too short".to_string()),
            ..Default::default()
        }
        .validate(now)
        .unwrap_err();
        assert_eq!(fields(err), vec!["content"]);
    }

    #[test]
    fn test_query_filters() {
        assert_eq!(status_filter(None).unwrap(), None);
        assert_eq!(status_filter(Some("")).unwrap(), None);
        assert_eq!(
            status_filter(Some("draft")).unwrap(),
            Some(PostStatus::Draft)
        );
        assert!(status_filter(Some("deleted")).is_err());
        assert!(category_filter(Some("nope")).is_err());
    }

    #[test]
    fn test_category_validation() {
        let draft = NewCategory {
            name: "  Rust  ".to_string(),
            description: Some("   ".to_string()),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.name, "Rust");
        assert_eq!(draft.description, None);

        let err = NewCategory {
            name: "R".to_string(),
            description: Some("d".repeat(201)),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(err), vec!["name", "description"]);
    }

    #[test]
    fn test_account_validation() {
        let draft = NewAccount {
            username: " ada ".to_string(),
            email: " Ada@Example.COM ".to_string(),
            password: "long-enough".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(draft.username, "ada");
        assert_eq!(draft.email, "ada@example.com");

        let err = NewAccount {
            username: "ab".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(fields(err), vec!["username", "email", "password"]);
    }
}
