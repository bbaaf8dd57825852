//! Newsletter sign-ups

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use validator::ValidateEmail;

use crate::domain::{DomainError, DomainResult, RepositoryProvider, Subscriber};
use crate::shared::validations::normalize_email;

pub const ALREADY_SUBSCRIBED: &str = "This email is already subscribed!";

pub struct NewsletterService {
    repos: Arc<dyn RepositoryProvider>,
}

impl NewsletterService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn subscribe(&self, email: &str) -> DomainResult<Subscriber> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(DomainError::Validation("Invalid email address".into()));
        }

        if self.repos.subscribers().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(ALREADY_SUBSCRIBED.into()));
        }

        let subscriber = self
            .repos
            .subscribers()
            .save(Subscriber {
                id: 0,
                email,
                subscribed_at: Utc::now(),
                active: true,
            })
            .await
            .map_err(|e| match e {
                DomainError::Conflict(_) => DomainError::Conflict(ALREADY_SUBSCRIBED.into()),
                other => other,
            })?;

        info!(subscriber_id = subscriber.id, "Newsletter subscription added");
        Ok(subscriber)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn service() -> NewsletterService {
        NewsletterService::new(Arc::new(InMemoryRepositoryProvider::new()))
    }

    #[tokio::test]
    async fn subscribe_normalizes_email() {
        let svc = service();
        let sub = svc.subscribe("  Reader@Example.com ").await.unwrap();
        assert_eq!(sub.email, "reader@example.com");
        assert!(sub.active);
    }

    #[tokio::test]
    async fn duplicate_is_reported_once_normalized() {
        let svc = service();
        svc.subscribe("reader@example.com").await.unwrap();
        let err = svc.subscribe("READER@example.com").await.unwrap_err();
        assert_eq!(err.to_string(), format!("Already exists: {}", ALREADY_SUBSCRIBED));
    }

    #[tokio::test]
    async fn malformed_email_is_rejected() {
        let svc = service();
        for bad in ["", "not-an-email", "@example.com"] {
            assert!(matches!(
                svc.subscribe(bad).await,
                Err(DomainError::Validation(_))
            ));
        }
    }
}
