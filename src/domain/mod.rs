//! Domain layer: typed records and repository interfaces

pub mod category;
pub mod post;
pub mod repositories;
pub mod subscriber;
pub mod user;

pub use category::{Category, CategoryRepository};
pub use post::{Post, PostDraft, PostFilter, PostRepository, PostWithCategory};
pub use repositories::{DomainResult, RepositoryProvider};
pub use subscriber::{Subscriber, SubscriberRepository};
pub use user::{User, UserRepository, UserRole};

pub use crate::shared::types::errors::DomainError;
