//! Editor sign-up, sign-in and profile

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
