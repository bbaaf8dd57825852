//! Post repository interface

use async_trait::async_trait;

use super::model::{Post, PostFilter};
use crate::domain::DomainResult;
use crate::shared::types::RowRange;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Post>>;
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Post>>;

    /// Number of posts matching `filter`.
    async fn count(&self, filter: &PostFilter) -> DomainResult<u64>;

    /// Posts matching `filter`, newest first, restricted to `range`.
    ///
    /// A range starting past the last match yields an empty list.
    async fn find_page(&self, filter: &PostFilter, range: RowRange) -> DomainResult<Vec<Post>>;

    /// Insert a post; fails with `Conflict` when the slug is taken.
    async fn save(&self, post: Post) -> DomainResult<Post>;
    /// Overwrite an existing post; fails with `Conflict` when the new slug
    /// belongs to another post.
    async fn update(&self, post: Post) -> DomainResult<Post>;
    async fn set_published(&self, id: i32, published: bool) -> DomainResult<Post>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
