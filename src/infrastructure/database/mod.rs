pub mod entities;
pub mod migrator;
pub mod repositories;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::DatabaseSection;
use migrator::Migrator;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./moneyfeast.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self::sqlite("./moneyfeast.db")
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            max_connections: 10,
        }
    }

    /// Private in-memory database. A single connection keeps every query on
    /// the same database.
    pub fn memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    pub fn from_section(section: &DatabaseSection) -> Self {
        let url = section.connection_url();
        let max_connections = if url.contains(":memory:") { 1 } else { 10 };
        Self {
            url,
            max_connections,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .sqlx_logging(false);
    let db = Database::connect(options).await?;

    // SQLite leaves foreign keys off unless asked per connection
    if config.url.starts_with("sqlite") {
        db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
    }

    info!("Database connected successfully");
    Ok(db)
}

/// Connect and bring the schema up to date.
pub async fn connect_and_migrate(
    config: &DatabaseConfig,
) -> Result<DatabaseConnection, sea_orm::DbErr> {
    let db = init_database(config).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations completed");
    Ok(db)
}
