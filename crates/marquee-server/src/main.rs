use anyhow::{Context, Result};
use marquee_db::{create_pool, run_migrations};
use marquee_server::config::load_config;
use marquee_server::seed::seed_initial_admin;
use marquee_server::state::AppState;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting Marquee server");

    // Load configuration
    let config_path =
        std::env::var("MARQUEE_CONFIG").unwrap_or_else(|_| "server-config.yaml".to_string());

    tracing::info!("Loading config from: {}", config_path);
    let config = load_config(&config_path)?;
    tracing::info!("Config loaded successfully");

    if config.classifier.api_key.is_none() {
        tracing::warn!("No classifier API key configured, admin reviews will fail");
    }

    // Create database pool
    tracing::info!("Connecting to database...");
    let pool = create_pool(&config.db.url, Duration::from_secs(config.db.timeout_secs))
        .await
        .context("Failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    if let Some(admin) = &config.auth.initial_admin {
        seed_initial_admin(&pool, admin)
            .await
            .context("Failed to seed initial admin")?;
    }

    // Build application state
    let listen = config.listen.clone();
    let state = AppState::new(pool, config).context("Failed to build application state")?;
    let app = marquee_server::web::build_router(state);

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind to {}", listen))?;

    tracing::info!("Server listening on {}", listen);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping...");
}
