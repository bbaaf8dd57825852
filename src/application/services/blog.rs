//! Public read side of the blog

use std::sync::Arc;

use tracing::debug;

use super::listing::{fetch_post_page, with_categories, PageSettings, PostPage};
use crate::config::BlogConfig;
use crate::domain::{
    Category, DomainError, DomainResult, PostFilter, PostWithCategory, RepositoryProvider,
};
use crate::shared::types::RowRange;

/// Listing sizes for the public pages.
#[derive(Debug, Clone, Copy)]
pub struct BlogSettings {
    pub page: PageSettings,
    pub featured_limit: u64,
    pub recent_limit: u64,
}

impl From<&BlogConfig> for BlogSettings {
    fn from(cfg: &BlogConfig) -> Self {
        Self {
            page: PageSettings::new(cfg.posts_per_page, cfg.max_visible_pages),
            featured_limit: cfg.featured_limit,
            recent_limit: cfg.recent_limit,
        }
    }
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self::from(&BlogConfig::default())
    }
}

/// Reader-facing queries. Only published posts are ever returned.
pub struct BlogService {
    repos: Arc<dyn RepositoryProvider>,
    settings: BlogSettings,
}

impl BlogService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: BlogSettings) -> Self {
        Self { repos, settings }
    }

    pub fn settings(&self) -> &BlogSettings {
        &self.settings
    }

    /// Newest featured posts for the home page hero.
    pub async fn featured(&self) -> DomainResult<Vec<PostWithCategory>> {
        self.latest(
            PostFilter::published().featured(true),
            self.settings.featured_limit,
        )
        .await
    }

    /// Newest non-featured posts for the home page grid.
    pub async fn recent(&self) -> DomainResult<Vec<PostWithCategory>> {
        self.latest(
            PostFilter::published().featured(false),
            self.settings.recent_limit,
        )
        .await
    }

    pub async fn list_published(&self, page: u64) -> DomainResult<PostPage> {
        fetch_post_page(
            self.repos.as_ref(),
            &PostFilter::published(),
            page,
            self.settings.page,
        )
        .await
    }

    pub async fn post_by_slug(&self, slug: &str) -> DomainResult<PostWithCategory> {
        let post = self
            .repos
            .posts()
            .find_by_slug(slug)
            .await?
            .filter(|p| p.published)
            .ok_or_else(|| DomainError::not_found("Post", "slug", slug))?;

        let category = self.repos.categories().find_by_id(post.category_id).await?;
        Ok(PostWithCategory { post, category })
    }

    pub async fn categories(&self) -> DomainResult<Vec<Category>> {
        self.repos.categories().find_all().await
    }

    /// A category and one page of its published posts.
    pub async fn category_posts(&self, slug: &str, page: u64) -> DomainResult<(Category, PostPage)> {
        let category = self
            .repos
            .categories()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found("Category", "slug", slug))?;

        let filter = PostFilter::published().in_category(category.id);
        let page = fetch_post_page(self.repos.as_ref(), &filter, page, self.settings.page).await?;
        Ok((category, page))
    }

    /// Full-text search over published posts.
    ///
    /// A blank query returns an empty page without querying the store.
    pub async fn search(&self, query: &str, page: u64) -> DomainResult<PostPage> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(PostPage::empty(self.settings.page));
        }

        debug!(query, page, "Searching posts");
        let filter = PostFilter::published().search(query);
        fetch_post_page(self.repos.as_ref(), &filter, page, self.settings.page).await
    }

    async fn latest(&self, filter: PostFilter, limit: u64) -> DomainResult<Vec<PostWithCategory>> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let posts = self
            .repos
            .posts()
            .find_page(&filter, RowRange { offset: 0, limit })
            .await?;
        with_categories(self.repos.as_ref(), posts).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::Post;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn post(n: i64, category_id: i32, published: bool, featured: bool) -> Post {
        let at = Utc::now() - Duration::hours(100 - n);
        Post {
            id: 0,
            title: format!("Money lesson {}", n),
            slug: format!("money-lesson-{}", n),
            excerpt: if n % 2 == 0 {
                "Crypto basics".into()
            } else {
                "Budget travel".into()
            },
            content: String::new(),
            author: "Admin".into(),
            category_id,
            featured,
            published,
            read_time: 5,
            created_at: at,
            updated_at: at,
        }
    }

    /// 54 published posts (every 10th featured) and 3 drafts.
    async fn service() -> BlogService {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        for n in 1..=54 {
            let category = if n <= 20 { 1 } else { 2 };
            repos
                .posts()
                .save(post(n, category, true, n % 10 == 0))
                .await
                .unwrap();
        }
        for n in 55..=57 {
            repos.posts().save(post(n, 1, false, true)).await.unwrap();
        }
        BlogService::new(repos, BlogSettings::default())
    }

    #[tokio::test]
    async fn feed_page_three_of_six() {
        let blog = service().await;
        let page = blog.list_published(3).await.unwrap();

        assert_eq!(page.total, 54);
        assert_eq!(page.total_pages, 6);
        assert_eq!(page.range, Some(RowRange { offset: 18, limit: 9 }));
        assert_eq!(page.items.len(), 9);
        assert_eq!(page.items[0].post.slug, "money-lesson-36");
        assert_eq!(page.pager.visible_pages, vec![1, 2, 3, 4, 5]);
        assert!(!page.pager.leading_ellipsis);
        assert!(page.pager.show_last_page);
        assert!(page.items.iter().all(|p| p.category.is_some()));
    }

    #[tokio::test]
    async fn page_past_the_end_is_clamped() {
        let blog = service().await;
        let page = blog.list_published(99).await.unwrap();
        assert_eq!(page.page, 6);
        assert_eq!(page.range, Some(RowRange { offset: 45, limit: 9 }));
        assert_eq!(page.items.len(), 9);
        assert!(!page.pager.has_next);
    }

    #[tokio::test]
    async fn featured_and_recent_split() {
        let blog = service().await;
        let featured = blog.featured().await.unwrap();
        let slugs: Vec<_> = featured.iter().map(|p| p.post.slug.as_str()).collect();
        assert_eq!(slugs, vec!["money-lesson-50", "money-lesson-40", "money-lesson-30"]);

        let recent = blog.recent().await.unwrap();
        assert_eq!(recent.len(), 6);
        assert!(recent.iter().all(|p| !p.post.featured && p.post.published));
        assert_eq!(recent[0].post.slug, "money-lesson-54");
    }

    #[tokio::test]
    async fn drafts_are_hidden_by_slug() {
        let blog = service().await;
        assert!(blog.post_by_slug("money-lesson-1").await.is_ok());
        assert!(matches!(
            blog.post_by_slug("money-lesson-55").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn category_listing() {
        let blog = service().await;
        let (category, page) = blog.category_posts("wealth", 1).await.unwrap();
        assert_eq!(category.name, "Wealth");
        assert_eq!(page.total, 20);
        assert_eq!(page.total_pages, 3);
        assert!(page.items.iter().all(|p| p.post.category_id == category.id));

        assert!(matches!(
            blog.category_posts("crypto", 1).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn search_filters_and_paginates() {
        let blog = service().await;
        let page = blog.search("  crypto ", 1).await.unwrap();
        assert_eq!(page.total, 27);
        assert_eq!(page.total_pages, 3);
        assert!(page.items.iter().all(|p| p.post.matches_text("crypto")));

        let empty = blog.search("   ", 4).await.unwrap();
        assert_eq!(empty.total, 0);
        assert_eq!(empty.range, None);
        assert!(empty.pager.is_empty());

        let none = blog.search("real estate", 1).await.unwrap();
        assert_eq!(none.total_pages, 0);
        assert!(none.items.is_empty());
    }
}
