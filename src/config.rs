//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/moneyfeast/config.toml` by default,
//! overridable with `MONEYFEAST_CONFIG`). Every section has defaults, so a
//! partial file or no file at all still yields a usable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::types::DEFAULT_MAX_VISIBLE_PAGES;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default config location: `<config dir>/moneyfeast/config.toml`
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("moneyfeast")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
    pub blog: BlogConfig,
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = Self::from_toml(&raw).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })?;
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blog.posts_per_page == 0 {
            return Err(ConfigError::Invalid(
                "blog.posts_per_page must be at least 1".into(),
            ));
        }
        if self.blog.max_visible_pages == 0 {
            return Err(ConfigError::Invalid(
                "blog.max_visible_pages must be at least 1".into(),
            ));
        }
        if self.security.jwt_secret.len() < 16 {
            return Err(ConfigError::Invalid(
                "security.jwt_secret must be at least 16 characters".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    Sqlite,
    /// In-memory SQLite, lost on exit
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: DatabaseBackend,
    /// SQLite file path
    pub path: String,
    /// Full connection URL; takes precedence over `path`
    pub url: Option<String>,
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        match self.backend {
            DatabaseBackend::Sqlite => format!("sqlite://{}?mode=rwc", self.path),
            DatabaseBackend::Memory => "sqlite::memory:".to_string(),
        }
    }
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: DatabaseBackend::Sqlite,
            path: "./moneyfeast.db".to_string(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "moneyfeast-dev-secret-change-me".to_string(),
            jwt_expiration_hours: 24,
        }
    }
}

/// Editor account created on first start when no users exist
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            email: "admin@moneyfeast.local".to_string(),
            display_name: "Admin".to_string(),
            password: "change-me-now".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub posts_per_page: u64,
    pub max_visible_pages: u64,
    pub featured_limit: u64,
    pub recent_limit: u64,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            posts_per_page: 9,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
            featured_limit: 3,
            recent_limit: 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.blog.posts_per_page, 9);
        assert_eq!(cfg.blog.max_visible_pages, 5);
        assert_eq!(cfg.database.backend, DatabaseBackend::Sqlite);
    }

    #[test]
    fn partial_sections_are_merged_with_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            port = 9100

            [blog]
            posts_per_page = 12

            [database]
            backend = "memory"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.blog.posts_per_page, 12);
        assert_eq!(cfg.blog.recent_limit, 6);
        assert_eq!(cfg.database.connection_url(), "sqlite::memory:");
    }

    #[test]
    fn explicit_url_wins() {
        let db = DatabaseSection {
            url: Some("sqlite:///var/lib/moneyfeast/blog.db?mode=rwc".into()),
            ..Default::default()
        };
        assert_eq!(
            db.connection_url(),
            "sqlite:///var/lib/moneyfeast/blog.db?mode=rwc"
        );
        assert_eq!(
            DatabaseSection::default().connection_url(),
            "sqlite://./moneyfeast.db?mode=rwc"
        );
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = AppConfig::from_toml("[blog]\nposts_per_page = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn short_jwt_secret_is_rejected() {
        let err = AppConfig::from_toml("[security]\njwt_secret = \"short\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = AppConfig::load(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(cfg.logging.level, "info");
    }
}
