//! Failure taxonomy for orchestrated operations

use thiserror::Error;

use crate::domain::ItemId;
use crate::storage::{DecodeError, GatewayError};

/// Broad failure class, for callers that only need to pick a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Duplicate,
    Index,
    Corruption,
    Storage,
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Please fill in the {field} field")]
    Validation { field: &'static str },

    #[error("'{name}' is already on the list")]
    Duplicate { name: String },

    #[error("No item at index {index} (list has {len} items)")]
    Index { index: usize, len: usize },

    #[error("Item {id} is no longer on the list")]
    Missing { id: ItemId },

    #[error("No new item id is available after {max}")]
    IdsExhausted { max: ItemId },

    #[error("Stored value under '{key}' is corrupt: {source}")]
    Corruption {
        key: &'static str,
        #[source]
        source: DecodeError,
    },

    #[error("Storage failed: {0}")]
    Storage(#[source] GatewayError),
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Validation { .. } | SyncError::IdsExhausted { .. } => {
                ErrorKind::Validation
            }
            SyncError::Duplicate { .. } => ErrorKind::Duplicate,
            SyncError::Index { .. } | SyncError::Missing { .. } => ErrorKind::Index,
            SyncError::Corruption { .. } => ErrorKind::Corruption,
            SyncError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<GatewayError> for SyncError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Corrupt { key, source } => SyncError::Corruption { key, source },
            other => SyncError::Storage(other),
        }
    }
}
