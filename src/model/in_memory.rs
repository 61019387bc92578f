//! InMemoryModelStore - HashMap-backed model store for tests and single-process use.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use super::{Model, ModelError, ModelStore, Versioned};

/// JSON document plus the version it was written at.
struct Document {
    json: Vec<u8>,
    version: u64,
}

type Documents = HashMap<String, Document>;

/// Versioned documents keyed by `"COLLECTION:id"`.
///
/// Clones share the same map. Each call takes the lock once, so the version
/// check and the write in `update_model` happen atomically.
#[derive(Clone, Default)]
pub struct InMemoryModelStore {
    documents: Arc<RwLock<Documents>>,
}

impl InMemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key<M: Model>(id: &str) -> String {
        format!("{}:{}", M::COLLECTION, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Documents>, ModelError> {
        self.documents
            .read()
            .map_err(|_| ModelError::Storage("in-memory model store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Documents>, ModelError> {
        self.documents
            .write()
            .map_err(|_| ModelError::Storage("in-memory model store lock poisoned".into()))
    }

    /// The stored JSON for `M` with this id, exactly as written.
    pub fn raw_document<M: Model>(&self, id: &str) -> Result<Option<Vec<u8>>, ModelError> {
        Ok(self.read()?.get(&Self::key::<M>(id)).map(|doc| doc.json.clone()))
    }

    /// Number of documents across all collections.
    pub fn len(&self) -> usize {
        self.documents.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ModelStore for InMemoryModelStore {
    async fn get_model<M: Model>(&self, id: &str) -> Result<Option<Versioned<M>>, ModelError> {
        let docs = self.read()?;
        let Some(doc) = docs.get(&Self::key::<M>(id)) else {
            return Ok(None);
        };
        Ok(Some(Versioned {
            data: serde_json::from_slice(&doc.json)?,
            version: doc.version,
        }))
    }

    async fn insert_model<M: Model>(&self, model: &M) -> Result<Versioned<M>, ModelError> {
        let json = serde_json::to_vec(model)?;
        let mut docs = self.write()?;

        match docs.entry(Self::key::<M>(model.id())) {
            Entry::Occupied(_) => Err(ModelError::AlreadyExists {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(Document { json, version: 1 });
                Ok(Versioned {
                    data: model.clone(),
                    version: 1,
                })
            }
        }
    }

    async fn update_model<M: Model>(
        &self,
        model: &M,
        expected_version: u64,
    ) -> Result<Versioned<M>, ModelError> {
        let json = serde_json::to_vec(model)?;
        let mut docs = self.write()?;

        let doc = docs
            .get_mut(&Self::key::<M>(model.id()))
            .ok_or_else(|| ModelError::NotFound {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
            })?;

        if doc.version != expected_version {
            return Err(ModelError::ConcurrencyConflict {
                collection: M::COLLECTION.to_string(),
                id: model.id().to_string(),
                expected: expected_version,
                actual: doc.version,
            });
        }

        doc.json = json;
        doc.version += 1;
        Ok(Versioned {
            data: model.clone(),
            version: doc.version,
        })
    }

    async fn delete_model<M: Model>(&self, id: &str) -> Result<bool, ModelError> {
        Ok(self.write()?.remove(&Self::key::<M>(id)).is_some())
    }
}
