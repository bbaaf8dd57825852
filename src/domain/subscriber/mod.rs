//! Newsletter subscriber aggregate

pub mod model;
pub mod repository;

pub use model::Subscriber;
pub use repository::SubscriberRepository;
