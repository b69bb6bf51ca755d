use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of content characters copied into a derived excerpt.
pub const EXCERPT_SOURCE_CHARS: usize = 200;

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(PostStatus::Draft),
            "published" => Some(PostStatus::Published),
            _ => None,
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Post entity - a blog article owned by its author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub author_id: Uuid,
    pub category_id: Uuid,
    pub tags: Vec<String>,
    pub slug: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for a new post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Uuid,
    pub tags: Vec<String>,
    pub status: PostStatus,
}

/// Validated partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub category_id: Option<Uuid>,
    pub tags: Option<Vec<String>>,
    pub status: Option<PostStatus>,
    pub updated_at: DateTime<Utc>,
}

impl PostUpdate {
    /// An update that only bumps `updated_at`.
    pub fn empty(updated_at: DateTime<Utc>) -> Self {
        Self {
            title: None,
            content: None,
            excerpt: None,
            featured_image: None,
            category_id: None,
            tags: None,
            status: None,
            updated_at,
        }
    }

    /// Whether applying this update publishes the post.
    pub fn publishes(&self) -> bool {
        self.status == Some(PostStatus::Published)
    }
}

impl Post {
    /// Build a new post from validated fields, deriving slug, excerpt and
    /// `published_at` from the creation instant.
    pub fn create(author_id: Uuid, draft: PostDraft, now: DateTime<Utc>) -> Self {
        let slug = derive_slug(&draft.title, now);
        let excerpt = draft
            .excerpt
            .unwrap_or_else(|| derive_excerpt(&draft.content));
        let published_at = (draft.status == PostStatus::Published).then_some(now);

        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            excerpt,
            featured_image: draft.featured_image,
            author_id,
            category_id: draft.category_id,
            tags: draft.tags,
            slug,
            status: draft.status,
            published_at,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge an update into the document.
    ///
    /// Slug, author and view count are never touched. `published_at` is a
    /// first-published marker: it is set the first time the status becomes
    /// published and kept from then on.
    pub fn apply_update(&mut self, update: &PostUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(content) = &update.content {
            self.content = content.clone();
        }
        if let Some(excerpt) = &update.excerpt {
            self.excerpt = excerpt.clone();
        }
        if let Some(image) = &update.featured_image {
            self.featured_image = Some(image.clone());
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(tags) = &update.tags {
            self.tags = tags.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if update.publishes() && self.published_at.is_none() {
            self.published_at = Some(update.updated_at);
        }
        self.updated_at = update.updated_at;
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}

/// Lowercase the title, turn spaces into dashes and drop everything that is
/// not a word character or a dash.
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// Slug for a post created at `created_at`: `<slugified title>-<unix millis>`.
pub fn derive_slug(title: &str, created_at: DateTime<Utc>) -> String {
    format!("{}-{}", slugify(title), created_at.timestamp_millis())
}

/// Excerpt used when the author did not supply one.
pub fn derive_excerpt(content: &str) -> String {
    let head: String = content.chars().take(EXCERPT_SOURCE_CHARS).collect();
    format!("{head}...")
}

/// Author reference resolved to its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub username: Option<String>,
}

/// Category reference resolved to its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: Option<String>,
}

/// A post with its author and category populated, as returned to readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub author: AuthorSummary,
    pub category: CategorySummary,
    pub tags: Vec<String>,
    pub slug: String,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub view_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostDetails {
    pub fn new(post: Post, author_name: Option<String>, category_name: Option<String>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            featured_image: post.featured_image,
            author: AuthorSummary {
                id: post.author_id,
                username: author_name,
            },
            category: CategorySummary {
                id: post.category_id,
                name: category_name,
            },
            tags: post.tags,
            slug: post.slug,
            status: post.status,
            published_at: post.published_at,
            view_count: post.view_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn draft(status: PostStatus) -> PostDraft {
        PostDraft {
            title: "A Valid Title Here".to_string(),
            content: "x".repeat(60),
            excerpt: None,
            featured_image: None,
            category_id: Uuid::new_v4(),
            tags: vec![],
            status,
        }
    }

    #[test]
    fn test_slugify_strips_punctuation() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("Rust & Tokio: a tour"), "rust--tokio-a-tour");
        assert_eq!(slugify("snake_case stays"), "snake_case-stays");
    }

    #[test]
    fn test_derive_slug_appends_millis() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(
            derive_slug("A Valid Title Here", at),
            "a-valid-title-here-1700000000123"
        );
    }

    #[test]
    fn test_derive_excerpt_truncates_by_chars() {
        let content = "é".repeat(250);
        let excerpt = derive_excerpt(&content);
        assert_eq!(excerpt.chars().count(), 203);
        assert!(excerpt.ends_with("..."));

        assert_eq!(derive_excerpt("short"), "short...");
    }

    #[test]
    fn test_create_defaults() {
        let now = Utc::now();
        let author = Uuid::new_v4();
        let post = Post::create(author, draft(PostStatus::Draft), now);

        assert_eq!(post.author_id, author);
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, None);
        assert_eq!(post.view_count, 0);
        assert_eq!(post.slug, derive_slug("A Valid Title Here", now));
        assert_eq!(post.excerpt, format!("{}...", "x".repeat(60)));
    }

    #[test]
    fn test_create_published_sets_published_at() {
        let now = Utc::now();
        let post = Post::create(Uuid::new_v4(), draft(PostStatus::Published), now);
        assert_eq!(post.published_at, Some(now));
    }

    #[test]
    fn test_supplied_excerpt_is_kept() {
        let mut input = draft(PostStatus::Draft);
        input.excerpt = Some("Hand written".to_string());
        let post = Post::create(Uuid::new_v4(), input, Utc::now());
        assert_eq!(post.excerpt, "Hand written");
    }

    #[test]
    fn test_published_at_is_set_once() {
        let created = Utc::now();
        let mut post = Post::create(Uuid::new_v4(), draft(PostStatus::Draft), created);

        let first = created + Duration::seconds(10);
        post.apply_update(&PostUpdate {
            status: Some(PostStatus::Published),
            ..PostUpdate::empty(first)
        });
        assert_eq!(post.published_at, Some(first));

        post.apply_update(&PostUpdate {
            status: Some(PostStatus::Draft),
            ..PostUpdate::empty(first + Duration::seconds(10))
        });
        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.published_at, Some(first));

        post.apply_update(&PostUpdate {
            status: Some(PostStatus::Published),
            ..PostUpdate::empty(first + Duration::seconds(20))
        });
        assert_eq!(post.published_at, Some(first));
    }

    #[test]
    fn test_update_keeps_slug_and_excerpt() {
        let mut post = Post::create(Uuid::new_v4(), draft(PostStatus::Draft), Utc::now());
        let slug = post.slug.clone();
        let excerpt = post.excerpt.clone();

        post.apply_update(&PostUpdate {
            title: Some("A Completely New Title".to_string()),
            content: Some("y".repeat(80)),
            ..PostUpdate::empty(Utc::now())
        });

        assert_eq!(post.title, "A Completely New Title");
        assert_eq!(post.slug, slug);
        assert_eq!(post.excerpt, excerpt);
    }
}
