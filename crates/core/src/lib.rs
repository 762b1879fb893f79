//! # Freakinbeats Core
//!
//! Core storefront logic for the Freakinbeats record shop.
//!
//! This crate contains pure data operations:
//! - The read-only listing inventory loaded from the marketplace export
//! - Detail page state, driven by the identifier found in the page path
//! - Startup configuration helpers
//!
//! **No HTTP concerns**: routing, page shells and JSON responses belong in the server binary.

pub mod config;
pub mod constants;
pub mod detail;
pub mod error;
pub mod inventory;
pub mod listing;

pub use config::CoreConfig;
pub use constants::*;
pub use detail::{DetailState, DetailView};
pub use error::{StoreError, StoreResult};
pub use inventory::{FacetCount, InventoryFacets, InventoryService, InventoryStats, SearchQuery};
pub use listing::Listing;

pub use freakinbeats_uuid::{resolve, PathSource, RecordUuid};
