//! Category repository interface

use async_trait::async_trait;

use super::model::Category;
use crate::domain::DomainResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories ordered by name.
    async fn find_all(&self) -> DomainResult<Vec<Category>>;
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Category>>;
    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>>;
}
