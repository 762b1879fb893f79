use freakinbeats_uuid::UuidError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid listing identifier: {0}")]
    InvalidUuid(#[from] UuidError),
    #[error("failed to read inventory file {path}: {source}", path = path.display())]
    InventoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse inventory file {path}: {source}", path = path.display())]
    InventoryParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("duplicate listing uuid in inventory: {0}")]
    DuplicateListing(String),
    #[error("invalid listen address '{value}': {source}")]
    InvalidListenAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
