//! Blog Service
//!
//! REST backend for posts, comments, users and chat messages.
//!
//! ```sh
//! # Run with default config (~/.config/blog-service/config.toml)
//! blog-service
//!
//! # Custom config path and port
//! blog-service --config /etc/blog-service/config.toml --port 8080
//!
//! # Validate config without starting
//! blog-service --check
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use blog_service::config::LogFormat;
use blog_service::infrastructure::crypto::PasswordHasher;
use blog_service::infrastructure::database::migrator::Migrator;
use blog_service::infrastructure::{listen_for_shutdown_signals, ShutdownSignal};
use blog_service::shared::Paginator;
use blog_service::{
    create_api_router, default_config_path, init_database, AppConfig, AppState,
    SeaOrmRepositoryProvider,
};

/// Blog and chat REST backend with filterable, paginated listings.
#[derive(Parser, Debug)]
#[command(name = "blog-service", version)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "BLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port.
    #[arg(short, long)]
    port: Option<u16>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the server.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging.level, config.logging.format);
    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) if cli.check => {
            error!("{}", e);
            return Err(e.into());
        }
        Some(e) => error!("Failed to load config: {}. Using defaults.", e),
    }

    let paginator = match Paginator::new(config.pagination.clone()) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            error!("Invalid pagination settings: {}", e);
            return Err(e.into());
        }
    };

    if cli.check {
        info!("✅ Configuration is valid");
        return Ok(());
    }

    info!("Starting Blog Service...");

    // ── Database ───────────────────────────────────────────────
    info!("Database: {}", config.database.url);
    let db = match init_database(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if cli.no_migrate {
        warn!("Skipping database migrations");
    } else {
        info!("Running database migrations...");
        if let Err(e) = Migrator::up(&db, None).await {
            error!("Failed to run migrations: {}", e);
            return Err(e.into());
        }
        info!("Migrations completed");
    }

    let repos = SeaOrmRepositoryProvider::new(
        db.clone(),
        paginator,
        PasswordHasher::new(config.security.hash_rounds),
    );
    let router = create_api_router(AppState::new(db.clone(), repos));

    // ── Shutdown handling ──────────────────────────────────────
    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    // ── REST API ───────────────────────────────────────────────
    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let api_shutdown = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                api_shutdown.wait().await;
                info!("🛑 REST API server received shutdown signal");
            })
            .await
    });

    info!("🚀 Server started. Press Ctrl+C to shutdown gracefully.");

    let grace = Duration::from_secs(config.server.shutdown_timeout);
    tokio::select! {
        result = &mut server => report(result),
        _ = shutdown.wait() => {
            match tokio::time::timeout(grace, &mut server).await {
                Ok(result) => report(result),
                Err(_) => {
                    warn!("In-flight requests did not finish within {:?}", grace);
                    server.abort();
                }
            }
        }
    }

    // ── Cleanup ────────────────────────────────────────────────
    info!("🧹 Performing final cleanup...");
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("✅ Database connection closed");
    }

    info!("👋 Blog Service shutdown complete");
    Ok(())
}

fn report(result: Result<std::io::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => info!("REST API server stopped"),
        Ok(Err(e)) => error!("REST API server error: {}", e),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}
