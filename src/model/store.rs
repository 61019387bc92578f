//! ModelStore - Abstract versioned storage for models.

use async_trait::async_trait;

use super::{Model, ModelError, Versioned};

/// Abstract versioned storage for models.
///
/// Every call is a single attempt. Implementations must not retry internally;
/// callers decide what to do with a conflict.
#[async_trait]
pub trait ModelStore: Send + Sync {
    /// Get a model and its current version. Returns None if not found.
    async fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError>;

    /// Insert a new model at version 1. Fails with `AlreadyExists` if present.
    async fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError>;

    /// Replace an existing model if its stored version equals `expected_version`.
    ///
    /// Returns the model with its new version, `ConcurrencyConflict` when the
    /// stored version moved on, or `NotFound` when the model is gone.
    async fn update_model<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError>;

    /// Delete a model by ID. Returns true if it existed.
    async fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError>;
}
