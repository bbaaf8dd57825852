//! MoneyFeast blog server
//!
//! Public posts API plus the editor CMS.
//! Reads configuration from TOML file (~/.config/moneyfeast/config.toml).

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use moneyfeast::application::services::AuthService;
use moneyfeast::config::LoggingConfig;
use moneyfeast::infrastructure::crypto::jwt::JwtConfig;
use moneyfeast::shared::shutdown::ShutdownCoordinator;
use moneyfeast::{
    connect_and_migrate, create_api_router, default_config_path, AppConfig, AppState,
    DatabaseConfig, RepositoryProvider, SeaOrmRepositoryProvider,
};

fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));
    if logging.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("MONEYFEAST_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_logging(&cfg.logging);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            init_logging(&LoggingConfig::default());
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting MoneyFeast blog server...");

    // Recorder goes in before the first metrics call
    let prometheus_handle = match metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
    {
        Ok(handle) => {
            info!("Prometheus metrics recorder installed");
            Some(handle)
        }
        Err(e) => {
            warn!("Metrics disabled, recorder not installed: {}", e);
            None
        }
    };

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig::from_section(&app_cfg.database);
    info!("Database: {}", db_config.url);

    let db = match connect_and_migrate(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to prepare database: {}", e);
            return Err(e.into());
        }
    };
    info!("Migrations completed");

    // Create default admin account when no users exist
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let accounts = AuthService::new(repos, JwtConfig::from_security(&app_cfg.security));
    match accounts.bootstrap_admin(&app_cfg.admin).await {
        Ok(Some(admin)) => info!("Default admin created: {}", admin.email),
        Ok(None) => {}
        Err(e) => error!("Failed to create admin user: {}", e),
    }

    // ── Shutdown coordination ──────────────────────────────────
    let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
    shutdown.start_signal_listener();
    let shutdown_signal = shutdown.signal();

    // ── REST API ───────────────────────────────────────────────
    let state = AppState::new(db.clone(), &app_cfg);
    let api_router = create_api_router(state, prometheus_handle);

    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    let api_server = axum::serve(
        listener,
        api_router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        api_shutdown.wait().await;
        info!("REST API server received shutdown signal");
    });

    info!("Server started. Press Ctrl+C to shutdown gracefully.");
    let api_result = tokio::spawn(async move { api_server.await });

    match api_result.await {
        Ok(Ok(())) => info!("REST API server stopped"),
        Ok(Err(e)) => error!("REST API server error: {}", e),
        Err(e) => error!("REST API server task panicked: {}", e),
    }

    // Signal may not have fired if the server exited on its own
    shutdown_signal.trigger();
    let cleaned = shutdown
        .shutdown_with_cleanup(|| async move {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("Database connection closed");
            }
        })
        .await;
    if !cleaned {
        warn!("Database did not close before the shutdown timeout");
    }

    info!("MoneyFeast blog server shutdown complete");
    Ok(())
}
