//! SeaORM implementation of SubscriberRepository

use async_trait::async_trait;
use log::info;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use super::{db_err, insert_err};
use crate::domain::subscriber::{Subscriber, SubscriberRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::subscriber;

fn entity_to_domain(s: subscriber::Model) -> Subscriber {
    Subscriber {
        id: s.id,
        email: s.email,
        subscribed_at: s.subscribed_at,
        active: s.active,
    }
}

pub struct SeaOrmSubscriberRepository {
    db: DatabaseConnection,
}

impl SeaOrmSubscriberRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriberRepository for SeaOrmSubscriberRepository {
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Subscriber>> {
        let model = subscriber::Entity::find()
            .filter(subscriber::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn save(&self, s: Subscriber) -> DomainResult<Subscriber> {
        if self.find_by_email(&s.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Subscriber '{}' already exists",
                s.email
            )));
        }

        let email = s.email.clone();
        let model = subscriber::ActiveModel {
            email: Set(s.email),
            subscribed_at: Set(s.subscribed_at),
            active: Set(s.active),
            ..Default::default()
        };
        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| insert_err(e, || format!("Subscriber '{}' already exists", email)))?;
        info!("Newsletter subscriber saved: {}", result.id);
        Ok(entity_to_domain(result))
    }
}
