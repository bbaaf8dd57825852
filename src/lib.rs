//! # MoneyFeast Blog
//!
//! Backend for the MoneyFeast personal-finance blog: a public posts API with
//! paginated listings, plus an authenticated editor CMS.
//!
//! ## Architecture
//!
//! - **domain**: Posts, categories, subscribers, users and repository traits
//! - **application**: Blog, editor, newsletter and account services
//! - **infrastructure**: SeaORM database, in-memory stores, JWT and bcrypt
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Pagination calculator, errors, validation helpers, shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use domain::RepositoryProvider;
pub use infrastructure::{
    connect_and_migrate, init_database, DatabaseConfig, InMemoryRepositoryProvider,
    SeaOrmRepositoryProvider,
};

pub use interfaces::http::{create_api_router, AppState};
pub use shared::types::{compute_pager, compute_range, PageQuery, PagerModel, RowRange};
