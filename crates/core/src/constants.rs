//! Constants used throughout the Freakinbeats core crate.
//!
//! This module contains the default locations and environment variable names so the binaries and
//! the core agree on them.

/// Default inventory export, relative to the working directory.
pub const DEFAULT_INVENTORY_FILE: &str = "ingest/inventory.json";

/// Default address the storefront server listens on.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

/// Environment variable overriding the inventory export location.
pub const INVENTORY_FILE_ENV: &str = "INVENTORY_FILE";

/// Environment variable overriding the server listen address.
pub const LISTEN_ADDR_ENV: &str = "FREAKINBEATS_ADDR";
