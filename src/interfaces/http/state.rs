//! Shared router state

use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use crate::application::{
    AuthService, BlogService, BlogSettings, EditorService, NewsletterService,
};
use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::SeaOrmRepositoryProvider;

use super::middleware::AuthState;
use super::modules::health::HealthState;

/// Services every handler can reach. Each module extracts the piece it
/// needs through `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub editor: Arc<EditorService>,
    pub newsletter: Arc<NewsletterService>,
    pub accounts: Arc<AuthService>,
    pub auth: AuthState,
    pub health: HealthState,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: &AppConfig) -> Self {
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        let jwt_config = JwtConfig::from_security(&config.security);
        let settings = BlogSettings::from(&config.blog);

        Self {
            blog: Arc::new(BlogService::new(repos.clone(), settings)),
            editor: Arc::new(EditorService::new(repos.clone(), settings.page)),
            newsletter: Arc::new(NewsletterService::new(repos.clone())),
            accounts: Arc::new(AuthService::new(repos, jwt_config.clone())),
            auth: AuthState { jwt_config },
            health: HealthState::new(db),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        s.auth.clone()
    }
}

impl FromRef<AppState> for HealthState {
    fn from_ref(s: &AppState) -> Self {
        s.health.clone()
    }
}
