//! Editor accounts: sign-up, sign-in and the bootstrap admin

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use validator::ValidateEmail;

use crate::config::AdminConfig;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, User, UserRole};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig, TokenClaims};
use crate::infrastructure::crypto::password::{hash_password, verify_password};
use crate::shared::validations::normalize_email;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Token issued after a successful sign-in
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub token_type: String,
    /// Seconds until the token expires
    pub expires_in: i64,
    pub user: User,
}

pub struct AuthService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl AuthService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    /// Register an editor account.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> DomainResult<User> {
        self.create_user(email, password, display_name, UserRole::Editor)
            .await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let email = normalize_email(email);
        let Some(user) = self.repos.users().find_by_email(&email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        if !user.is_active {
            return Err(DomainError::Unauthorized("Account is disabled".into()));
        }

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let claims = TokenClaims::new(
            &user.id,
            &user.email,
            &user.display_name,
            user.role.as_str(),
            &self.jwt_config,
        );
        let token = create_token(&claims, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        if let Err(e) = self.repos.users().touch_last_login(&user.id).await {
            warn!(user_id = %user.id, "Failed to record last login: {}", e);
        }

        info!(user_id = %user.id, "User signed in");
        Ok(AuthSession {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    pub async fn find_user(&self, id: &str) -> DomainResult<User> {
        self.repos
            .users()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", id))
    }

    /// Create the configured admin when the store has no accounts yet.
    ///
    /// Returns the new account, or `None` when users already exist.
    pub async fn bootstrap_admin(&self, admin: &AdminConfig) -> DomainResult<Option<User>> {
        if self.repos.users().count().await? > 0 {
            return Ok(None);
        }
        let user = self
            .create_user(
                &admin.email,
                &admin.password,
                &admin.display_name,
                UserRole::Admin,
            )
            .await?;
        warn!(
            email = %user.email,
            "Created default admin account; change its password"
        );
        Ok(Some(user))
    }

    async fn create_user(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
        role: UserRole,
    ) -> DomainResult<User> {
        let email = normalize_email(email);
        if !email.validate_email() {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        let display_name = match display_name.trim() {
            "" => email.split('@').next().unwrap_or_default().to_string(),
            name => name.to_string(),
        };

        if self.repos.users().find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }

        let password_hash = hash_password(password)
            .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))?;

        let now = Utc::now();
        let user = self
            .repos
            .users()
            .save(User {
                id: uuid::Uuid::new_v4().to_string(),
                email,
                display_name,
                password_hash,
                role,
                is_active: true,
                created_at: now,
                updated_at: now,
                last_login_at: None,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }
}
