//! In-process repository implementations

mod memory;

pub use memory::{
    InMemoryCategoryRepository, InMemoryPostRepository, InMemoryRepositoryProvider,
    InMemorySubscriberRepository, InMemoryUserRepository,
};
