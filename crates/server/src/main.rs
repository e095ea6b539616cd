use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maglens_core::{
    load_config, validate_config, BitmagnetClient, FileResolver, MagnetMetadataFetcher,
    MetadataFetcher, SearchBackend, SessionController,
};

use maglens_server::api::create_router;
use maglens_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("MAGLENS_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Index backend: {}", config.backend.url);

    // Create the index client
    let backend: Arc<dyn SearchBackend> = Arc::new(BitmagnetClient::new(config.backend.clone()));

    // Create the peer metadata fallback if enabled
    let fetcher: Option<Arc<dyn MetadataFetcher>> = if config.metadata.enabled {
        match MagnetMetadataFetcher::new(&config.metadata).await {
            Ok(fetcher) => {
                info!("Peer metadata fallback enabled");
                Some(Arc::new(fetcher))
            }
            Err(e) => {
                warn!(
                    "Failed to initialize peer metadata session, fallback disabled: {}",
                    e
                );
                None
            }
        }
    } else {
        info!("Peer metadata fallback disabled in config");
        None
    };

    // Create the session controller and file resolver
    let session = SessionController::new(Arc::clone(&backend));
    let resolver = FileResolver::new(
        backend,
        fetcher,
        Duration::from_secs(config.metadata.timeout_secs),
    );

    // Create app state and router
    let state = Arc::new(AppState::new(config.clone(), session, resolver));
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
