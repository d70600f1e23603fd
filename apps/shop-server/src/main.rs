//! # Fakeshop
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Startup                                          │
//! │                                                                         │
//! │  env ──► ShopConfig ──► stock.toml ──────► Inventory::stock            │
//! │                         promotions.toml ─► PromotionCatalog::register  │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                          HTTP (8888) ◄──── axum Router                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any catalog problem at startup is fatal.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fakeshop_server::catalog::{load_inventory, load_promotions};
use fakeshop_server::routes;
use fakeshop_server::{ShopConfig, ShopState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting fakeshop...");

    let config = ShopConfig::load()?;
    info!(
        addr = %config.bind_address(),
        stock = %config.stock_file.display(),
        promotions = %config.promotions_file.display(),
        cart_ttl_secs = config.cart_ttl_secs,
        "Configuration loaded"
    );

    let products = load_inventory(&config.stock_file)?;
    let promotions = load_promotions(&config.promotions_file)?;

    let state = ShopState::new(&config);
    state
        .install_catalogs(products, promotions)
        .context("failed to stock inventory")?;

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", bind_addr))?;

    routes::serve(listener, state.shared(), shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Log filter from `RUST_LOG`, falling back to info with debug for our crates.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,fakeshop=debug,fakeshop_core=debug,fakeshop_server=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received, starting graceful shutdown...");
}
