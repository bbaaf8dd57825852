//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod category_repository;
pub mod post_repository;
pub mod repository_provider;
pub mod subscriber_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Map a unique-constraint violation to `Conflict`, anything else to `Storage`.
fn insert_err(e: sea_orm::DbErr, conflict: impl FnOnce() -> String) -> DomainError {
    let text = e.to_string();
    if text.contains("UNIQUE") || text.contains("duplicate") {
        DomainError::Conflict(conflict())
    } else {
        db_err(e)
    }
}
