//! Post aggregate
//!
//! Contains the Post entity, editor drafts, store filters, and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{
    Post, PostDraft, PostFilter, PostWithCategory, DEFAULT_AUTHOR, DEFAULT_READ_TIME,
    MAX_READ_TIME,
};
pub use repository::PostRepository;
