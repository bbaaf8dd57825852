//! Paginated post listings shared by the public feed and the dashboard

use std::collections::HashMap;

use crate::domain::{
    Category, DomainResult, Post, PostFilter, PostWithCategory, RepositoryProvider,
};
use crate::shared::types::{PageQuery, PagerModel, RowRange};

/// Page size and pager width for one kind of listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub per_page: u64,
    pub max_visible_pages: u64,
}

impl PageSettings {
    pub fn new(per_page: u64, max_visible_pages: u64) -> Self {
        Self {
            per_page: per_page.max(1),
            max_visible_pages: max_visible_pages.max(1),
        }
    }
}

/// One page of posts plus everything needed to render its pager.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub items: Vec<PostWithCategory>,
    pub total: u64,
    /// Page actually served, after clamping
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
    /// Window fetched from the store; `None` when nothing matched
    pub range: Option<RowRange>,
    pub pager: PagerModel,
}

impl PostPage {
    pub fn empty(settings: PageSettings) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            per_page: settings.per_page,
            total_pages: 0,
            range: None,
            pager: PagerModel::empty(1, 0),
        }
    }
}

/// Count matches, clamp `page`, fetch the window and build the pager.
pub(crate) async fn fetch_post_page(
    repos: &dyn RepositoryProvider,
    filter: &PostFilter,
    page: u64,
    settings: PageSettings,
) -> DomainResult<PostPage> {
    let total = repos.posts().count(filter).await?;
    let query = PageQuery::new(total, settings.per_page, page).clamped();

    let range = query.range()?;
    let posts = match range {
        Some(range) => repos.posts().find_page(filter, range).await?,
        None => Vec::new(),
    };

    Ok(PostPage {
        items: with_categories(repos, posts).await?,
        total,
        page: query.current_page,
        per_page: settings.per_page,
        total_pages: query.total_pages(),
        range,
        pager: query.pager(settings.max_visible_pages),
    })
}

/// Attach each post's category, looked up once per call.
pub(crate) async fn with_categories(
    repos: &dyn RepositoryProvider,
    posts: Vec<Post>,
) -> DomainResult<Vec<PostWithCategory>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }
    let categories: HashMap<i32, Category> = repos
        .categories()
        .find_all()
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(posts
        .into_iter()
        .map(|post| PostWithCategory {
            category: categories.get(&post.category_id).cloned(),
            post,
        })
        .collect())
}
