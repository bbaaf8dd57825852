//! Post DTOs shared by the public and admin endpoints

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::PostPage;
use crate::domain::{Category, PostWithCategory};
use crate::interfaces::http::common::{PaginatedResponse, PaginationMeta};

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    /// Icon name, e.g. "DollarSign"
    pub icon: String,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            description: c.description,
            icon: c.icon,
        }
    }
}

/// Post card as shown in listings (no body)
#[derive(Debug, Serialize, ToSchema)]
pub struct PostSummaryDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub author: String,
    pub category: Option<CategoryDto>,
    pub featured: bool,
    pub published: bool,
    /// Minutes
    pub read_time: i32,
    pub created_at: DateTime<Utc>,
}

impl From<PostWithCategory> for PostSummaryDto {
    fn from(p: PostWithCategory) -> Self {
        let PostWithCategory { post, category } = p;
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            author: post.author,
            category: category.map(CategoryDto::from),
            featured: post.featured,
            published: post.published,
            read_time: post.read_time,
            created_at: post.created_at,
        }
    }
}

/// Full post including the markdown body
#[derive(Debug, Serialize, ToSchema)]
pub struct PostDetailDto {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    /// Markdown
    pub content: String,
    pub author: String,
    pub category_id: i32,
    pub category: Option<CategoryDto>,
    pub featured: bool,
    pub published: bool,
    pub read_time: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostWithCategory> for PostDetailDto {
    fn from(p: PostWithCategory) -> Self {
        let PostWithCategory { post, category } = p;
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            excerpt: post.excerpt,
            content: post.content,
            author: post.author,
            category_id: post.category_id,
            category: category.map(CategoryDto::from),
            featured: post.featured,
            published: post.published,
            read_time: post.read_time,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

pub fn summaries(items: Vec<PostWithCategory>) -> Vec<PostSummaryDto> {
    items.into_iter().map(PostSummaryDto::from).collect()
}

impl From<PostPage> for PaginatedResponse<PostSummaryDto> {
    fn from(page: PostPage) -> Self {
        let meta = PaginationMeta::from(&page);
        PaginatedResponse::new(summaries(page.items), meta)
    }
}
