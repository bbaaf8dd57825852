//! Editor CMS: post management behind authentication

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
