//! Editor CMS operations
//!
//! Every call takes the [`EditorContext`] of the signed-in account.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::listing::{fetch_post_page, PageSettings, PostPage};
use crate::application::context::EditorContext;
use crate::domain::{
    DomainError, DomainResult, Post, PostDraft, PostFilter, PostWithCategory, RepositoryProvider,
};

pub struct EditorService {
    repos: Arc<dyn RepositoryProvider>,
    settings: PageSettings,
}

impl EditorService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: PageSettings) -> Self {
        Self { repos, settings }
    }

    /// All posts, drafts included, newest first.
    pub async fn dashboard(&self, _ctx: &EditorContext, page: u64) -> DomainResult<PostPage> {
        fetch_post_page(
            self.repos.as_ref(),
            &PostFilter::default(),
            page,
            self.settings,
        )
        .await
    }

    pub async fn get(&self, _ctx: &EditorContext, id: i32) -> DomainResult<PostWithCategory> {
        let post = self.find(id).await?;
        let category = self.repos.categories().find_by_id(post.category_id).await?;
        Ok(PostWithCategory { post, category })
    }

    pub async fn create(&self, ctx: &EditorContext, draft: PostDraft) -> DomainResult<Post> {
        let draft = draft.normalize(&ctx.display_name)?;
        self.ensure_category(draft.category_id).await?;

        let post = self
            .repos
            .posts()
            .save(Post::from_draft(draft, Utc::now()))
            .await?;
        info!(post_id = post.id, slug = %post.slug, editor = %ctx.email, "Post created");
        Ok(post)
    }

    pub async fn update(&self, ctx: &EditorContext, id: i32, draft: PostDraft) -> DomainResult<Post> {
        let existing = self.find(id).await?;
        let draft = draft.normalize(&ctx.display_name)?;
        self.ensure_category(draft.category_id).await?;

        let post = self
            .repos
            .posts()
            .update(existing.apply_draft(draft, Utc::now()))
            .await?;
        info!(post_id = post.id, slug = %post.slug, editor = %ctx.email, "Post updated");
        Ok(post)
    }

    /// Flip a post between draft and published.
    pub async fn toggle_published(&self, ctx: &EditorContext, id: i32) -> DomainResult<Post> {
        let existing = self.find(id).await?;
        let post = self
            .repos
            .posts()
            .set_published(id, !existing.published)
            .await?;
        info!(
            post_id = id,
            published = post.published,
            editor = %ctx.email,
            "Post visibility changed"
        );
        Ok(post)
    }

    /// Permanently remove a post.
    pub async fn delete(&self, ctx: &EditorContext, id: i32) -> DomainResult<()> {
        self.repos.posts().delete(id).await?;
        info!(post_id = id, editor = %ctx.email, "Post deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> DomainResult<Post> {
        self.repos
            .posts()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", "id", id))
    }

    async fn ensure_category(&self, category_id: i32) -> DomainResult<()> {
        match self.repos.categories().find_by_id(category_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!(
                "Category {} does not exist",
                category_id
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn editor() -> EditorContext {
        EditorContext::new("u-1", "jane@moneyfeast.local", "Jane Doe", UserRole::Editor)
    }

    fn admin() -> EditorContext {
        EditorContext::new("u-0", "admin@moneyfeast.local", "Admin", UserRole::Admin)
    }

    fn service() -> EditorService {
        EditorService::new(
            Arc::new(InMemoryRepositoryProvider::new()),
            PageSettings::new(10, 5),
        )
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.into(),
            excerpt: "Short summary".into(),
            content: "Body".into(),
            category_id: 2,
            ..PostDraft::default()
        }
    }

    #[tokio::test]
    async fn create_fills_defaults_from_context() {
        let svc = service();
        let post = svc
            .create(&editor(), draft("Remote Work from Bali"))
            .await
            .unwrap();
        assert!(post.id > 0);
        assert_eq!(post.slug, "remote-work-from-bali");
        assert_eq!(post.author, "Jane Doe");
        assert_eq!(post.read_time, 5);
        assert!(!post.published);

        let loaded = svc.get(&editor(), post.id).await.unwrap();
        assert_eq!(loaded.category.map(|c| c.slug).as_deref(), Some("lifestyle"));
    }

    #[tokio::test]
    async fn create_rejects_missing_fields_and_unknown_category() {
        let svc = service();
        let err = svc.create(&editor(), draft("  ")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Validation: Please fill in all required fields"
        );

        let err = svc
            .create(
                &editor(),
                PostDraft {
                    category_id: 42,
                    ..draft("Orphan")
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_slug_conflicts() {
        let svc = service();
        svc.create(&editor(), draft("Side Hustles")).await.unwrap();
        let err = svc.create(&editor(), draft("Side Hustles")).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn update_keeps_identity() {
        let svc = service();
        let post = svc.create(&editor(), draft("First Title")).await.unwrap();

        let updated = svc
            .update(
                &editor(),
                post.id,
                PostDraft {
                    slug: "first-title".into(),
                    published: true,
                    ..draft("Better Title")
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.id, post.id);
        assert_eq!(updated.slug, "first-title");
        assert_eq!(updated.title, "Better Title");
        assert_eq!(updated.created_at, post.created_at);
        assert!(updated.published);

        assert!(matches!(
            svc.update(&editor(), 999, draft("Ghost")).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn toggle_flips_visibility() {
        let svc = service();
        let post = svc.create(&editor(), draft("Toggle Me")).await.unwrap();
        assert!(svc.toggle_published(&editor(), post.id).await.unwrap().published);
        assert!(!svc.toggle_published(&editor(), post.id).await.unwrap().published);
    }

    #[tokio::test]
    async fn editors_and_admins_delete() {
        let svc = service();
        let own = svc.create(&editor(), draft("Doomed")).await.unwrap();
        let other = svc.create(&admin(), draft("Also Doomed")).await.unwrap();

        svc.delete(&editor(), own.id).await.unwrap();
        svc.delete(&editor(), other.id).await.unwrap();
        assert!(matches!(
            svc.get(&admin(), own.id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete(&admin(), other.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn dashboard_includes_drafts() {
        let svc = service();
        for n in 0..12 {
            let published = n % 3 == 0;
            svc.create(
                &editor(),
                PostDraft {
                    published,
                    ..draft(&format!("Entry {}", n))
                },
            )
            .await
            .unwrap();
        }
        let page = svc.dashboard(&editor(), 2).await.unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pager.visible_pages, vec![1, 2]);
    }
}
