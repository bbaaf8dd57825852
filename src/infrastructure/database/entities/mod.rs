//! Database entities module

pub mod category;
pub mod post;
pub mod subscriber;
pub mod user;

pub use category::Entity as Category;
pub use post::Entity as Post;
pub use subscriber::Entity as Subscriber;
pub use user::Entity as User;
