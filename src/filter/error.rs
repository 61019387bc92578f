//! Error types for filter updates.

use crate::model::ModelError;
use crate::notify::NotifyError;

/// A request that cannot be applied to the filter as it stands.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid filter id [{filter_id}]: {reason}")]
    InvalidFilterId {
        filter_id: String,
        reason: &'static str,
    },
    #[error("Cannot remove item [{item}] as it is not present in filter [{filter_id}]")]
    ItemNotPresent { item: String, filter_id: String },
    #[error("Item [{item}] cannot be both added to and removed from filter [{filter_id}]")]
    OverlappingItems { item: String, filter_id: String },
    #[error("Filter [{filter_id}] would hold {count} items, more than the maximum of {max}")]
    TooManyItems {
        filter_id: String,
        count: usize,
        max: usize,
    },
}

/// Every way a filter operation can fail.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// No filter with this id at read time (or it vanished before the write).
    #[error("No filter with id [{filter_id}] exists")]
    NotFound { filter_id: String },
    /// Create of a filter whose id is taken.
    #[error("A filter with id [{filter_id}] already exists")]
    AlreadyExists { filter_id: String },
    /// The request is invalid for the filter's current state.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Another writer changed the filter between our read and our write.
    #[error("Error updating filter with id [{filter_id}] because it was modified while the update was in progress")]
    Conflict {
        filter_id: String,
        #[source]
        source: ModelError,
    },
    /// Storage failure unrelated to versioning.
    #[error("Error updating filter with id [{filter_id}]")]
    Internal {
        filter_id: String,
        #[source]
        source: ModelError,
    },
    /// The write committed but observers could not be told.
    #[error(transparent)]
    Notify(#[from] NotifyError),
}

impl UpdateError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            UpdateError::NotFound { .. } => 404,
            UpdateError::AlreadyExists { .. } => 409,
            UpdateError::Validation(_) => 400,
            UpdateError::Conflict { .. } => 409,
            UpdateError::Internal { .. } => 500,
            UpdateError::Notify(_) => 500,
        }
    }

    /// Translate a store failure for `filter_id`.
    pub(crate) fn from_store(filter_id: &str, err: ModelError) -> Self {
        let filter_id = filter_id.to_string();
        match err {
            ModelError::ConcurrencyConflict { .. } => UpdateError::Conflict {
                filter_id,
                source: err,
            },
            ModelError::NotFound { .. } => UpdateError::NotFound { filter_id },
            ModelError::AlreadyExists { .. } => UpdateError::AlreadyExists { filter_id },
            ModelError::Serde(_) | ModelError::Storage(_) => UpdateError::Internal {
                filter_id,
                source: err,
            },
        }
    }
}
