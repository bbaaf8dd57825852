use async_trait::async_trait;

use super::model::User;
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;
    async fn count(&self) -> DomainResult<u64>;
    /// Insert an account; fails with `Conflict` when the email exists.
    async fn save(&self, user: User) -> DomainResult<User>;
    async fn touch_last_login(&self, id: &str) -> DomainResult<()>;
}
