pub mod admin;
pub mod auth;
pub mod categories;
pub mod health;
pub mod metrics;
pub mod newsletter;
pub mod posts;
pub mod request_id;
pub mod search;
