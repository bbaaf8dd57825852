//! Repository access for the domain layer

use super::category::CategoryRepository;
use super::post::PostRepository;
use super::subscriber::SubscriberRepository;
use super::user::UserRepository;

pub use crate::shared::types::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let post = repos.posts().find_by_slug("art-of-passive-income-2025").await?;
///     let categories = repos.categories().find_all().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn posts(&self) -> &dyn PostRepository;
    fn categories(&self) -> &dyn CategoryRepository;
    fn subscribers(&self) -> &dyn SubscriberRepository;
    fn users(&self) -> &dyn UserRepository;
}
