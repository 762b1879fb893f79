//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Environment variables are read by the binaries only; the helpers
//! here take the raw values as arguments so they stay testable.

use crate::constants::{DEFAULT_INVENTORY_FILE, DEFAULT_LISTEN_ADDR};
use crate::{StoreError, StoreResult};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    inventory_file: PathBuf,
    listen_addr: SocketAddr,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(inventory_file: PathBuf, listen_addr: SocketAddr) -> StoreResult<Self> {
        if inventory_file.as_os_str().is_empty() {
            return Err(StoreError::InvalidInput(
                "inventory file path cannot be empty".into(),
            ));
        }

        Ok(Self {
            inventory_file,
            listen_addr,
        })
    }

    pub fn inventory_file(&self) -> &Path {
        &self.inventory_file
    }

    pub fn listen_addr(&self) -> SocketAddr {
        self.listen_addr
    }
}

/// Resolve the inventory export file without reading environment variables.
///
/// If `override_file` is provided, it must be an existing file. Otherwise this looks for
/// `ingest/inventory.json` relative to the current working directory and then walks up from
/// `CARGO_MANIFEST_DIR`.
pub fn resolve_inventory_file(override_file: Option<PathBuf>) -> StoreResult<PathBuf> {
    if let Some(file) = override_file {
        if file.is_file() {
            return Ok(file);
        }
        return Err(StoreError::InvalidInput(format!(
            "INVENTORY_FILE override is not a file: {}",
            file.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_INVENTORY_FILE);
    if cwd_relative.is_file() {
        return Ok(cwd_relative);
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_INVENTORY_FILE);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    Err(StoreError::InvalidInput(format!(
        "could not locate {} inventory export",
        DEFAULT_INVENTORY_FILE
    )))
}

/// Parse the listen address from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default `0.0.0.0:3000`.
pub fn listen_addr_from_env_value(value: Option<String>) -> StoreResult<SocketAddr> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

    value
        .parse()
        .map_err(|source| StoreError::InvalidListenAddr { value, source })
}
