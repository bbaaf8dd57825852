//! Application layer: use cases on top of the domain repositories

pub mod context;
pub mod services;

pub use context::EditorContext;
pub use services::{
    AuthService, AuthSession, BlogService, BlogSettings, EditorService, NewsletterService,
    PageSettings, PostPage,
};
