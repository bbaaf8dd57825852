//! Application services

mod auth;
mod blog;
mod editor;
mod listing;
mod newsletter;

pub use auth::{AuthService, AuthSession, MIN_PASSWORD_LEN};
pub use blog::{BlogService, BlogSettings};
pub use editor::EditorService;
pub use listing::{PageSettings, PostPage};
pub use newsletter::{NewsletterService, ALREADY_SUBSCRIBED};
