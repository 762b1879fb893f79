//! Storefront server binary.
//!
//! ## Purpose
//! Loads the inventory export once and serves the storefront pages and JSON API.
//!
//! # Environment Variables
//! - `FREAKINBEATS_ADDR`: Server address (default: "0.0.0.0:3000")
//! - `INVENTORY_FILE`: Inventory export (default: `ingest/inventory.json`)
//! - `RUST_LOG`: Extra tracing filter directives

use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use freakinbeats_core::{
    CoreConfig, INVENTORY_FILE_ENV, InventoryService, LISTEN_ADDR_ENV,
    config::{listen_addr_from_env_value, resolve_inventory_file},
};

/// Main entry point for the Freakinbeats storefront.
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the inventory file cannot be located, read or parsed,
/// - the listen address is invalid or cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("freakinbeats_run=info".parse()?)
                .add_directive("freakinbeats_core=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let inventory_override = std::env::var(INVENTORY_FILE_ENV).ok().map(PathBuf::from);
    let inventory_file = resolve_inventory_file(inventory_override)?;
    let listen_addr = listen_addr_from_env_value(std::env::var(LISTEN_ADDR_ENV).ok())?;
    let cfg = CoreConfig::new(inventory_file, listen_addr)?;

    let inventory = InventoryService::load(cfg.inventory_file())?;
    if inventory.is_empty() {
        tracing::warn!("Inventory {} has no listings", cfg.inventory_file().display());
    }

    tracing::info!("++ Starting Freakinbeats on {}", cfg.listen_addr());

    let app = freakinbeats_run::app(Arc::new(inventory));
    let listener = tokio::net::TcpListener::bind(cfg.listen_addr()).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
