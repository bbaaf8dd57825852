//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::category::CategoryRepository;
use crate::domain::post::PostRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::subscriber::SubscriberRepository;
use crate::domain::user::UserRepository;

use super::category_repository::SeaOrmCategoryRepository;
use super::post_repository::SeaOrmPostRepository;
use super::subscriber_repository::SeaOrmSubscriberRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let post = repos.posts().find_by_slug("crypto-volatility").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    posts: SeaOrmPostRepository,
    categories: SeaOrmCategoryRepository,
    subscribers: SeaOrmSubscriberRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            posts: SeaOrmPostRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db.clone()),
            subscribers: SeaOrmSubscriberRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn posts(&self) -> &dyn PostRepository {
        &self.posts
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn subscribers(&self) -> &dyn SubscriberRepository {
        &self.subscribers
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
