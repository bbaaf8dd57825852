//! Post domain entity
//!
//! Contains the Post entity, the editor's draft input, and the filter used to
//! select posts from the store.

use chrono::{DateTime, Utc};

use crate::domain::category::Category;
use crate::domain::{DomainError, DomainResult};
use crate::shared::validations::{is_valid_slug, slugify};

/// Read time assumed when the editor leaves it empty.
pub const DEFAULT_READ_TIME: i32 = 5;
/// Upper bound for the read time an editor may enter, in minutes.
pub const MAX_READ_TIME: i32 = 120;
/// Author shown when neither the draft nor the editor provides one.
pub const DEFAULT_AUTHOR: &str = "Admin";

/// Blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Markdown body
    pub content: String,
    pub author: String,
    pub category_id: i32,
    pub featured: bool,
    pub published: bool,
    /// Estimated reading time in minutes
    pub read_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a new (unsaved) post from a normalized draft.
    pub fn from_draft(draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            title: draft.title,
            slug: draft.slug,
            excerpt: draft.excerpt,
            content: draft.content,
            author: draft.author,
            category_id: draft.category_id,
            featured: draft.featured,
            published: draft.published,
            read_time: draft.read_time.unwrap_or(DEFAULT_READ_TIME),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a normalized draft, keeping identity and creation time.
    pub fn apply_draft(self, draft: PostDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            created_at: self.created_at,
            ..Self::from_draft(draft, now)
        }
    }

    /// Case-insensitive substring match across title, excerpt and content.
    pub fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        [&self.title, &self.excerpt, &self.content]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Post joined with its category for listings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostWithCategory {
    pub post: Post,
    pub category: Option<Category>,
}

/// Editor input for creating or updating a post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub author: String,
    pub category_id: i32,
    pub featured: bool,
    pub published: bool,
    pub read_time: Option<i32>,
}

impl PostDraft {
    /// Trim fields, fill defaults and check required fields.
    ///
    /// An empty slug is derived from the title; an empty author falls back
    /// to `fallback_author`, then to [`DEFAULT_AUTHOR`].
    pub fn normalize(mut self, fallback_author: &str) -> DomainResult<Self> {
        self.title = self.title.trim().to_string();
        self.excerpt = self.excerpt.trim().to_string();
        self.author = self.author.trim().to_string();
        self.slug = self.slug.trim().to_string();

        if self.slug.is_empty() {
            self.slug = slugify(&self.title);
        }

        if self.title.is_empty() || self.slug.is_empty() || self.category_id <= 0 {
            return Err(DomainError::Validation(
                "Please fill in all required fields".to_string(),
            ));
        }

        if !is_valid_slug(&self.slug) {
            return Err(DomainError::Validation(format!(
                "Slug '{}' must be lowercase letters, digits and dashes",
                self.slug
            )));
        }

        if self.author.is_empty() {
            let fallback = fallback_author.trim();
            self.author = if fallback.is_empty() {
                DEFAULT_AUTHOR.to_string()
            } else {
                fallback.to_string()
            };
        }

        let read_time = self.read_time.unwrap_or(DEFAULT_READ_TIME);
        if !(1..=MAX_READ_TIME).contains(&read_time) {
            return Err(DomainError::Validation(format!(
                "Read time must be between 1 and {} minutes",
                MAX_READ_TIME
            )));
        }
        self.read_time = Some(read_time);

        Ok(self)
    }
}

/// Predicate handed to the post store
///
/// Every set field must match. Results are always ordered newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub published: Option<bool>,
    pub featured: Option<bool>,
    pub category_id: Option<i32>,
    /// Free-text match across title, excerpt and content
    pub search: Option<String>,
}

impl PostFilter {
    /// Posts visible to readers.
    pub fn published() -> Self {
        Self {
            published: Some(true),
            ..Self::default()
        }
    }

    pub fn featured(mut self, featured: bool) -> Self {
        self.featured = Some(featured);
        self
    }

    pub fn in_category(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    pub fn matches(&self, post: &Post) -> bool {
        if self.published.is_some_and(|p| post.published != p) {
            return false;
        }
        if self.featured.is_some_and(|f| post.featured != f) {
            return false;
        }
        if self.category_id.is_some_and(|c| post.category_id != c) {
            return false;
        }
        match &self.search {
            Some(text) => post.matches_text(text),
            None => true,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            title: "  Smart Investing in Crypto Volatility ".into(),
            slug: String::new(),
            excerpt: "Riding the waves.".into(),
            content: "# Volatility\nStay calm.".into(),
            author: String::new(),
            category_id: 1,
            featured: false,
            published: true,
            read_time: None,
        }
    }

    fn sample_post() -> Post {
        Post::from_draft(draft().normalize("Jane").unwrap(), Utc::now())
    }

    #[test]
    fn normalize_derives_slug_and_defaults() {
        let d = draft().normalize("Jane Editor").unwrap();
        assert_eq!(d.title, "Smart Investing in Crypto Volatility");
        assert_eq!(d.slug, "smart-investing-in-crypto-volatility");
        assert_eq!(d.author, "Jane Editor");
        assert_eq!(d.read_time, Some(DEFAULT_READ_TIME));
    }

    #[test]
    fn normalize_falls_back_to_admin_author() {
        let d = draft().normalize("   ").unwrap();
        assert_eq!(d.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn normalize_keeps_explicit_slug_and_author() {
        let d = PostDraft {
            slug: "crypto-2025".into(),
            author: "Sam".into(),
            ..draft()
        }
        .normalize("Jane")
        .unwrap();
        assert_eq!(d.slug, "crypto-2025");
        assert_eq!(d.author, "Sam");
    }

    #[test]
    fn normalize_requires_title_and_category() {
        let missing_title = PostDraft {
            title: "   ".into(),
            ..draft()
        };
        assert!(matches!(
            missing_title.normalize("Jane"),
            Err(DomainError::Validation(_))
        ));

        let missing_category = PostDraft {
            category_id: 0,
            ..draft()
        };
        assert!(matches!(
            missing_category.normalize("Jane"),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn normalize_rejects_malformed_slug() {
        let d = PostDraft {
            slug: "Not A Slug".into(),
            ..draft()
        };
        assert!(matches!(d.normalize("Jane"), Err(DomainError::Validation(_))));
    }

    #[test]
    fn normalize_bounds_read_time() {
        for bad in [0, -4, MAX_READ_TIME + 1] {
            let d = PostDraft {
                read_time: Some(bad),
                ..draft()
            };
            assert!(d.normalize("Jane").is_err());
        }
    }

    #[test]
    fn apply_draft_keeps_identity() {
        let mut post = sample_post();
        post.id = 42;
        let created = post.created_at;

        let updated = post.apply_draft(
            PostDraft {
                title: "Renamed".into(),
                ..draft()
            }
            .normalize("Jane")
            .unwrap(),
            Utc::now(),
        );
        assert_eq!(updated.id, 42);
        assert_eq!(updated.created_at, created);
        assert_eq!(updated.title, "Renamed");
        assert_eq!(updated.slug, "renamed");
    }

    #[test]
    fn text_match_is_case_insensitive_across_fields() {
        let post = sample_post();
        assert!(post.matches_text("CRYPTO"));
        assert!(post.matches_text("waves"));
        assert!(post.matches_text("stay calm"));
        assert!(!post.matches_text("real estate"));
    }

    #[test]
    fn filter_combines_predicates() {
        let post = sample_post();
        assert!(PostFilter::default().matches(&post));
        assert!(PostFilter::published().matches(&post));
        assert!(PostFilter::published().featured(false).matches(&post));
        assert!(!PostFilter::published().featured(true).matches(&post));
        assert!(!PostFilter::published().in_category(2).matches(&post));
        assert!(PostFilter::published().search("volatility").matches(&post));
        assert!(!PostFilter::published().search("travel").matches(&post));

        let mut draft_post = post.clone();
        draft_post.published = false;
        assert!(!PostFilter::published().matches(&draft_post));
    }
}
