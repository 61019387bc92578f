//! Models - Versioned, storage-backed documents.
//!
//! Models provide a small CRUD abstraction over typed documents, each paired
//! with a store-assigned version. Writers echo the version they read back to
//! the store, which rejects the write if another writer got there first.
//!
//! ## Example
//!
//! ```ignore
//! use sourced_filters::{Model, InMemoryModelStore, ModelsExt};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Watchlist {
//!     pub id: String,
//!     pub symbols: Vec<String>,
//! }
//!
//! impl Model for Watchlist {
//!     const COLLECTION: &'static str = "watchlists";
//!     fn id(&self) -> &str { &self.id }
//! }
//!
//! let store = InMemoryModelStore::new();
//! let created = store.models::<Watchlist>().insert(&list).await?;
//! let loaded = store.models::<Watchlist>().get("tech").await?;
//! store.models::<Watchlist>().update(&changed, created.version).await?;
//! ```

mod in_memory;
mod model_repository;
mod store;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be stored as models.
pub trait Model: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The collection name for this model type (e.g., "filters").
    /// Maps to a table in SQL, an index in a document store, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this model instance.
    fn id(&self) -> &str;
}

/// A versioned wrapper around model data for optimistic concurrency control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for model store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Optimistic concurrency conflict.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected}, actual {actual})")]
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Insert of a model that already exists.
    #[error("model already exists: {collection}:{id}")]
    AlreadyExists { collection: String, id: String },
    /// Serialization/deserialization error.
    #[error("model serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("model storage error: {0}")]
    Storage(String),
    /// Model not found.
    #[error("model not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serde(err.to_string())
    }
}

pub use in_memory::InMemoryModelStore;
pub use model_repository::{ModelRepository, ModelsExt};
pub use store::ModelStore;
