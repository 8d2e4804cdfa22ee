//! Storefront Cart - a single-storefront shopping cart service
//!
//! Runs the cart API over in-memory collaborators.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_cart::api::create_router;
use storefront_cart::catalog::MemoryCatalog;
use storefront_cart::{spawn_cleanup_task, AppState, Config};

/// Main entry point for the cart service.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Load the catalog seed, if configured
/// 4. Build the cart service and start the snapshot cleanup task
/// 5. Serve HTTP until SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_cart=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storefront cart service");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_ttl={}s, scope_key={:?}, default_scope={}, port={}, cleanup_interval={}s",
        config.cache_ttl,
        config.scope_key,
        config.default_scope,
        config.server_port,
        config.cleanup_interval
    );

    let catalog = match &config.catalog_seed_file {
        Some(path) => MemoryCatalog::from_json_file(path)
            .await
            .with_context(|| format!("loading catalog seed {}", path))?,
        None => {
            warn!("No CATALOG_SEED_FILE set, starting with an empty catalog");
            MemoryCatalog::new()
        }
    };
    info!("Catalog ready with {} products", catalog.len().await);

    let state = AppState::from_config(&config, catalog);
    let cleanup_handle = spawn_cleanup_task(state.snapshots.clone(), config.cleanup_interval);

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cleanup_handle))
        .await
        .context("serving HTTP")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM), then stops the cleanup task.
async fn shutdown_signal(cleanup_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    cleanup_handle.abort();
    warn!("Cleanup task aborted");
}
