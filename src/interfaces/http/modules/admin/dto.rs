use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::PostDraft;

/// Create or replace a post
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PostRequest {
    #[validate(length(max = 200, message = "title is too long"))]
    pub title: String,
    /// Generated from the title when empty
    #[serde(default)]
    #[validate(length(max = 200, message = "slug is too long"))]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// Markdown
    #[serde(default)]
    pub content: Option<String>,
    /// Defaults to the editor's display name
    #[serde(default)]
    pub author: Option<String>,
    pub category_id: i32,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub published: bool,
    /// Minutes, defaults to 5
    #[serde(default)]
    #[validate(range(min = 1, max = 120, message = "read time must be 1-120 minutes"))]
    pub read_time: Option<i32>,
}

impl From<PostRequest> for PostDraft {
    fn from(r: PostRequest) -> Self {
        Self {
            title: r.title,
            slug: r.slug.unwrap_or_default(),
            excerpt: r.excerpt.unwrap_or_default(),
            content: r.content.unwrap_or_default(),
            author: r.author.unwrap_or_default(),
            category_id: r.category_id,
            featured: r.featured,
            published: r.published,
            read_time: r.read_time,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedDto {
    pub id: i32,
}
