//! Infrastructure layer: persistence and crypto

pub mod crypto;
pub mod database;
pub mod storage;

pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{connect_and_migrate, init_database, DatabaseConfig};
pub use storage::InMemoryRepositoryProvider;
