//! SeaORM implementation of PostRepository

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use super::{db_err, insert_err};
use crate::domain::post::{Post, PostFilter, PostRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::post;
use crate::shared::types::RowRange;

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(p: post::Model) -> Post {
    Post {
        id: p.id,
        title: p.title,
        slug: p.slug,
        excerpt: p.excerpt,
        content: p.content,
        author: p.author,
        category_id: p.category_id,
        featured: p.featured,
        published: p.published,
        read_time: p.read_time,
        created_at: p.created_at,
        updated_at: p.updated_at,
    }
}

fn filter_condition(filter: &PostFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(published) = filter.published {
        cond = cond.add(post::Column::Published.eq(published));
    }
    if let Some(featured) = filter.featured {
        cond = cond.add(post::Column::Featured.eq(featured));
    }
    if let Some(category_id) = filter.category_id {
        cond = cond.add(post::Column::CategoryId.eq(category_id));
    }
    if let Some(text) = filter.search.as_deref() {
        // SQLite LIKE is case-insensitive for ASCII
        cond = cond.add(
            Condition::any()
                .add(post::Column::Title.contains(text))
                .add(post::Column::Excerpt.contains(text))
                .add(post::Column::Content.contains(text)),
        );
    }
    cond
}

fn filtered(filter: &PostFilter) -> Select<post::Entity> {
    post::Entity::find().filter(filter_condition(filter))
}

fn slug_taken(slug: &str) -> DomainError {
    DomainError::Conflict(format!("Slug '{}' is already used by another post", slug))
}

// ── SeaOrmPostRepository ────────────────────────────────────────

pub struct SeaOrmPostRepository {
    db: DatabaseConnection,
}

impl SeaOrmPostRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> DomainResult<post::Model> {
        post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .ok_or_else(|| DomainError::not_found("Post", "id", id))
    }

    async fn ensure_slug_free(&self, slug: &str, except_id: Option<i32>) -> DomainResult<()> {
        let owner = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match owner {
            Some(existing) if Some(existing.id) != except_id => Err(slug_taken(slug)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl PostRepository for SeaOrmPostRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Post>> {
        let model = post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Post>> {
        let model = post::Entity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn count(&self, filter: &PostFilter) -> DomainResult<u64> {
        filtered(filter).count(&self.db).await.map_err(db_err)
    }

    async fn find_page(&self, filter: &PostFilter, range: RowRange) -> DomainResult<Vec<Post>> {
        let models = filtered(filter)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .offset(range.offset)
            .limit(range.limit)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, p: Post) -> DomainResult<Post> {
        self.ensure_slug_free(&p.slug, None).await?;

        let slug = p.slug.clone();
        let model = post::ActiveModel {
            title: Set(p.title),
            slug: Set(p.slug),
            excerpt: Set(p.excerpt),
            content: Set(p.content),
            author: Set(p.author),
            category_id: Set(p.category_id),
            featured: Set(p.featured),
            published: Set(p.published),
            read_time: Set(p.read_time),
            created_at: Set(p.created_at),
            updated_at: Set(p.updated_at),
            ..Default::default()
        };
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_err(e, || format!("Slug '{}' is already used by another post", slug)))?;
        info!("Post saved: {} ({})", result.slug, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, p: Post) -> DomainResult<Post> {
        let existing = self.find_model(p.id).await?;
        self.ensure_slug_free(&p.slug, Some(p.id)).await?;

        let model = post::ActiveModel {
            id: Set(p.id),
            title: Set(p.title),
            slug: Set(p.slug),
            excerpt: Set(p.excerpt),
            content: Set(p.content),
            author: Set(p.author),
            category_id: Set(p.category_id),
            featured: Set(p.featured),
            published: Set(p.published),
            read_time: Set(p.read_time),
            created_at: Set(existing.created_at),
            updated_at: Set(p.updated_at),
        };
        let result = model.update(&self.db).await.map_err(db_err)?;
        info!("Post updated: {} ({})", result.slug, result.id);
        Ok(entity_to_domain(result))
    }

    async fn set_published(&self, id: i32, published: bool) -> DomainResult<Post> {
        let existing = self.find_model(id).await?;

        let mut model: post::ActiveModel = existing.into();
        model.published = Set(published);
        model.updated_at = Set(Utc::now());
        let result = model.update(&self.db).await.map_err(db_err)?;
        Ok(entity_to_domain(result))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Post", "id", id));
        }
        info!("Post deleted: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::infrastructure::database::{connect_and_migrate, DatabaseConfig};

    async fn repo() -> SeaOrmPostRepository {
        let db = connect_and_migrate(&DatabaseConfig::memory()).await.unwrap();
        SeaOrmPostRepository::new(db)
    }

    fn post(slug: &str, minutes: i64, published: bool, featured: bool) -> Post {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
        Post {
            id: 0,
            title: format!("Post {}", slug),
            slug: slug.to_string(),
            excerpt: String::new(),
            content: String::new(),
            author: "Admin".into(),
            category_id: 1,
            featured,
            published,
            read_time: 5,
            created_at: at,
            updated_at: at,
        }
    }

    #[tokio::test]
    async fn pages_are_newest_first() {
        let repo = repo().await;
        for i in 0..5 {
            repo.save(post(&format!("p{}", i), i, true, false)).await.unwrap();
        }
        repo.save(post("draft", 10, false, false)).await.unwrap();

        let filter = PostFilter::published();
        assert_eq!(repo.count(&filter).await.unwrap(), 5);

        let page = repo
            .find_page(&filter, RowRange { offset: 1, limit: 2 })
            .await
            .unwrap();
        let slugs: Vec<_> = page.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["p3", "p2"]);

        let past_end = repo
            .find_page(&filter, RowRange { offset: 10, limit: 2 })
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn search_matches_any_text_field() {
        let repo = repo().await;
        let mut a = post("a", 0, true, false);
        a.excerpt = "Crypto volatility explained".into();
        let mut b = post("b", 1, true, false);
        b.content = "Notes on remote work and travel".into();
        repo.save(a).await.unwrap();
        repo.save(b).await.unwrap();

        let filter = PostFilter::published().search("crypto");
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
        let filter = PostFilter::published().search("TRAVEL");
        assert_eq!(repo.count(&filter).await.unwrap(), 1);
        let filter = PostFilter::published().search("Post");
        assert_eq!(repo.count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn duplicate_slug_is_a_conflict() {
        let repo = repo().await;
        repo.save(post("same", 0, true, false)).await.unwrap();
        let err = repo.save(post("same", 1, true, false)).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let other = repo.save(post("other", 2, true, false)).await.unwrap();
        let err = repo
            .update(Post {
                slug: "same".into(),
                ..other
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn toggle_and_delete() {
        let repo = repo().await;
        let saved = repo.save(post("x", 0, false, true)).await.unwrap();

        let toggled = repo.set_published(saved.id, true).await.unwrap();
        assert!(toggled.published);
        assert_eq!(toggled.created_at, saved.created_at);

        repo.delete(saved.id).await.unwrap();
        assert!(repo.find_by_id(saved.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(saved.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
