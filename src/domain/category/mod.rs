//! Category aggregate

pub mod model;
pub mod repository;

pub use model::{Category, DEFAULT_CATEGORIES};
pub use repository::CategoryRepository;
