use async_trait::async_trait;

use super::model::Subscriber;
use crate::domain::DomainResult;

#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Subscriber>>;
    /// Insert a subscriber; fails with `Conflict` when the email exists.
    async fn save(&self, subscriber: Subscriber) -> DomainResult<Subscriber>;
}
