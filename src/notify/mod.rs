//! Change notification for committed filter updates.
//!
//! After a filter write commits, the service calls a [`ChangeNotifier`]
//! exactly once with the new filter and the items that were added and
//! removed. A notifier error fails the request, but the write stays.

#[cfg(feature = "bus")]
mod bus;
#[cfg(feature = "emitter")]
mod emitter;

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::filter::Filter;

#[cfg(feature = "bus")]
pub use bus::BusNotifier;
#[cfg(feature = "emitter")]
pub use emitter::EmitterNotifier;

/// What changed in one committed filter update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChange {
    /// The filter as written.
    pub filter: Filter,
    /// Store version assigned by the write.
    pub version: u64,
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

impl FilterChange {
    /// Wire form of this change.
    pub fn to_event(&self) -> FilterChanged {
        FilterChanged {
            filter_id: self.filter.id().to_string(),
            version: self.version,
            description: self.filter.description().map(str::to_string),
            items: self.filter.items().iter().cloned().collect(),
            added: self.added.iter().cloned().collect(),
            removed: self.removed.iter().cloned().collect(),
        }
    }
}

/// Serialized payload describing a filter change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChanged {
    pub filter_id: String,
    pub version: u64,
    pub description: Option<String>,
    pub items: Vec<String>,
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

/// Failure to deliver a change notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[cfg(feature = "bus")]
    #[error("failed to publish filter change: {0}")]
    Publish(#[from] crate::bus::PublishError),
    #[error("failed to encode filter change: {0}")]
    Encode(String),
    #[error("filter change rejected: {0}")]
    Rejected(String),
}

/// Observer of committed filter changes.
#[async_trait]
pub trait ChangeNotifier: Send + Sync {
    async fn notify_filter_changed(&self, change: &FilterChange) -> Result<(), NotifyError>;
}

#[async_trait]
impl<N: ChangeNotifier + ?Sized> ChangeNotifier for Arc<N> {
    async fn notify_filter_changed(&self, change: &FilterChange) -> Result<(), NotifyError> {
        (**self).notify_filter_changed(change).await
    }
}

/// Notifier that accepts every change and does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

#[async_trait]
impl ChangeNotifier for NoopNotifier {
    async fn notify_filter_changed(&self, _change: &FilterChange) -> Result<(), NotifyError> {
        Ok(())
    }
}
