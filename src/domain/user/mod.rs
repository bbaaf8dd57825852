//! Editor account aggregate

pub mod model;
pub mod repository;

pub use model::{User, UserRole};
pub use repository::UserRepository;
