//! HTTP REST API
//!
//! - `common`: response envelopes, error mapping, validated JSON
//! - `middleware`: bearer-token authentication
//! - `modules`: handlers grouped by resource
//! - `router`: route table and Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;

pub use router::create_api_router;
pub use state::AppState;
