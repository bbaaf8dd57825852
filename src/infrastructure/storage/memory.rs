//! In-memory repositories for development and testing

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::category::DEFAULT_CATEGORIES;
use crate::domain::{
    Category, CategoryRepository, DomainError, DomainResult, Post, PostFilter, PostRepository,
    RepositoryProvider, Subscriber, SubscriberRepository, User, UserRepository,
};
use crate::shared::types::RowRange;

// ── Posts ───────────────────────────────────────────────────────

/// Post store keyed by id, with a slug index enforcing uniqueness.
pub struct InMemoryPostRepository {
    posts: DashMap<i32, Post>,
    slugs: DashMap<String, i32>,
    counter: AtomicI32,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: DashMap::new(),
            slugs: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }

    fn claim_slug(&self, slug: &str, id: i32) -> DomainResult<()> {
        match self.slugs.entry(slug.to_string()) {
            Entry::Occupied(owner) if *owner.get() != id => Err(DomainError::Conflict(format!(
                "Slug '{}' is already used by another post",
                slug
            ))),
            Entry::Occupied(_) => Ok(()),
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(())
            }
        }
    }

    fn matching(&self, filter: &PostFilter) -> Vec<Post> {
        self.posts
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect()
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Post>> {
        Ok(self.posts.get(&id).map(|p| p.clone()))
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Post>> {
        let Some(id) = self.slugs.get(slug).map(|id| *id) else {
            return Ok(None);
        };
        self.find_by_id(id).await
    }

    async fn count(&self, filter: &PostFilter) -> DomainResult<u64> {
        Ok(self
            .posts
            .iter()
            .filter(|entry| filter.matches(entry.value()))
            .count() as u64)
    }

    async fn find_page(&self, filter: &PostFilter, range: RowRange) -> DomainResult<Vec<Post>> {
        let mut posts = self.matching(filter);
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        let offset = usize::try_from(range.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(range.limit).unwrap_or(usize::MAX);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn save(&self, mut post: Post) -> DomainResult<Post> {
        let id = self.counter.fetch_add(1, Ordering::SeqCst);
        self.claim_slug(&post.slug, id)?;
        post.id = id;
        self.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> DomainResult<Post> {
        let previous_slug = self
            .posts
            .get(&post.id)
            .map(|p| p.slug.clone())
            .ok_or_else(|| DomainError::not_found("Post", "id", post.id))?;

        if previous_slug != post.slug {
            self.claim_slug(&post.slug, post.id)?;
            self.slugs.remove(&previous_slug);
        }

        let mut stored = post;
        if let Some(existing) = self.posts.get(&stored.id) {
            stored.created_at = existing.created_at;
        }
        self.posts.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn set_published(&self, id: i32, published: bool) -> DomainResult<Post> {
        let mut entry = self
            .posts
            .get_mut(&id)
            .ok_or_else(|| DomainError::not_found("Post", "id", id))?;
        entry.published = published;
        entry.updated_at = Utc::now();
        Ok(entry.clone())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let (_, removed) = self
            .posts
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Post", "id", id))?;
        self.slugs.remove(&removed.slug);
        Ok(())
    }
}

// ── Categories ──────────────────────────────────────────────────

pub struct InMemoryCategoryRepository {
    categories: DashMap<i32, Category>,
}

impl InMemoryCategoryRepository {
    /// Store seeded with the default categories, ids starting at 1.
    pub fn new() -> Self {
        let categories = DashMap::new();
        let now = Utc::now();
        for (idx, (name, slug, description, icon)) in DEFAULT_CATEGORIES.iter().enumerate() {
            let id = idx as i32 + 1;
            categories.insert(
                id,
                Category {
                    id,
                    name: name.to_string(),
                    slug: slug.to_string(),
                    description: description.to_string(),
                    icon: icon.to_string(),
                    created_at: now,
                },
            );
        }
        Self { categories }
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let mut all: Vec<Category> = self.categories.iter().map(|c| c.clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Category>> {
        Ok(self.categories.get(&id).map(|c| c.clone()))
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>> {
        Ok(self
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .map(|c| c.clone()))
    }
}

// ── Subscribers ─────────────────────────────────────────────────

/// Subscribers keyed by normalized email.
pub struct InMemorySubscriberRepository {
    subscribers: DashMap<String, Subscriber>,
    counter: AtomicI32,
}

impl InMemorySubscriberRepository {
    pub fn new() -> Self {
        Self {
            subscribers: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl Default for InMemorySubscriberRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Subscriber>> {
        Ok(self.subscribers.get(email).map(|s| s.clone()))
    }

    async fn save(&self, mut subscriber: Subscriber) -> DomainResult<Subscriber> {
        match self.subscribers.entry(subscriber.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::Conflict(format!(
                "Subscriber '{}' already exists",
                subscriber.email
            ))),
            Entry::Vacant(slot) => {
                subscriber.id = self.counter.fetch_add(1, Ordering::SeqCst);
                slot.insert(subscriber.clone());
                Ok(subscriber)
            }
        }
    }
}

// ── Users ───────────────────────────────────────────────────────

pub struct InMemoryUserRepository {
    users: DashMap<String, User>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|u| u.clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.clone()))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn save(&self, user: User) -> DomainResult<User> {
        if self.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn touch_last_login(&self, id: &str) -> DomainResult<()> {
        let mut user = self
            .users
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("User", "id", id))?;
        let now = Utc::now();
        user.last_login_at = Some(now);
        user.updated_at = now;
        Ok(())
    }
}

// ── Provider ────────────────────────────────────────────────────

/// Repository provider holding everything in process memory
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    posts: InMemoryPostRepository,
    categories: InMemoryCategoryRepository,
    subscribers: InMemorySubscriberRepository,
    users: InMemoryUserRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn posts(&self) -> &dyn PostRepository {
        &self.posts
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn subscribers(&self) -> &dyn SubscriberRepository {
        &self.subscribers
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn post(slug: &str, age_minutes: i64) -> Post {
        let at = Utc::now() - Duration::minutes(age_minutes);
        Post {
            id: 0,
            title: slug.to_uppercase(),
            slug: slug.to_string(),
            excerpt: String::new(),
            content: String::new(),
            author: "Admin".into(),
            category_id: 1,
            featured: false,
            published: true,
            read_time: 5,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn categories_are_seeded_and_sorted() {
        let repo = InMemoryCategoryRepository::new();
        let names: Vec<_> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Business", "Lifestyle", "Wealth"]);
        assert_eq!(
            repo.find_by_slug("wealth").await.unwrap().unwrap().icon,
            "DollarSign"
        );
    }

    #[tokio::test]
    async fn slug_index_follows_updates_and_deletes() {
        let repo = InMemoryPostRepository::new();
        let a = repo.save(post("alpha", 0)).await.unwrap();
        assert!(repo.save(post("alpha", 1)).await.is_err());

        let renamed = repo
            .update(Post {
                slug: "beta".into(),
                ..a.clone()
            })
            .await
            .unwrap();
        assert_eq!(renamed.id, a.id);
        assert!(repo.find_by_slug("alpha").await.unwrap().is_none());
        assert!(repo.save(post("alpha", 2)).await.is_ok());

        repo.delete(a.id).await.unwrap();
        assert!(repo.find_by_slug("beta").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn find_page_orders_newest_first() {
        let repo = InMemoryPostRepository::new();
        for (slug, age) in [("old", 30), ("new", 1), ("mid", 10)] {
            repo.save(post(slug, age)).await.unwrap();
        }
        let page = repo
            .find_page(&PostFilter::published(), RowRange { offset: 0, limit: 2 })
            .await
            .unwrap();
        let slugs: Vec<_> = page.into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, vec!["new", "mid"]);
    }

    #[tokio::test]
    async fn duplicate_subscriber_conflicts() {
        let repo = InMemorySubscriberRepository::new();
        let s = Subscriber {
            id: 0,
            email: "reader@example.com".into(),
            subscribed_at: Utc::now(),
            active: true,
        };
        let saved = repo.save(s.clone()).await.unwrap();
        assert_eq!(saved.id, 1);
        assert!(matches!(repo.save(s).await, Err(DomainError::Conflict(_))));
    }
}
