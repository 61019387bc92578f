//! Filter service: versioned reads and optimistic-concurrency writes.
//!
//! `FilterService<S, N>` holds a model store and a change notifier. An update
//! is one pass through read → plan → conditional write → notify; a version
//! conflict fails the request instead of retrying.
//!
//! ## Example
//!
//! ```ignore
//! use sourced_filters::{Filter, FilterService, InMemoryModelStore, NoopNotifier, UpdateFilterRequest};
//!
//! let service = FilterService::new(InMemoryModelStore::new(), NoopNotifier);
//! service.create(Filter::new("safe_domains", None, ["a.com"])?).await?;
//!
//! let filter = service
//!     .update(UpdateFilterRequest::new("safe_domains").add(["b.com"]).remove(["a.com"]))
//!     .await?;
//! ```

use tracing::{debug, error, info, instrument, warn};

use crate::config::FilterConfig;
use crate::filter::{check_limits, plan, Filter, Plan, UpdateError, UpdateFilterRequest};
use crate::model::{ModelError, ModelStore, ModelsExt, Versioned};
use crate::notify::{ChangeNotifier, FilterChange};

/// Orchestrates filter operations against a store and a notifier.
pub struct FilterService<S, N> {
    store: S,
    notifier: N,
    config: FilterConfig,
}

impl<S: ModelStore, N: ChangeNotifier> FilterService<S, N> {
    /// Create a service with default limits.
    pub fn new(store: S, notifier: N) -> Self {
        Self {
            store,
            notifier,
            config: FilterConfig::default(),
        }
    }

    /// Replace the limits and naming used by this service.
    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Store a new filter at version 1.
    pub async fn create(&self, filter: Filter) -> Result<Versioned<Filter>, UpdateError> {
        check_limits(&filter, &self.config)?;
        let created = self
            .store
            .models::<Filter>()
            .insert(&filter)
            .await
            .map_err(|err| UpdateError::from_store(filter.id(), err))?;
        info!(filter_id = %filter.id(), items = filter.items().len(), "filter created");
        Ok(created)
    }

    /// Current filter and its version.
    pub async fn get(&self, filter_id: &str) -> Result<Versioned<Filter>, UpdateError> {
        self.store
            .models::<Filter>()
            .get(filter_id)
            .await
            .map_err(|err| UpdateError::from_store(filter_id, err))?
            .ok_or_else(|| UpdateError::NotFound {
                filter_id: filter_id.to_string(),
            })
    }

    pub async fn delete(&self, filter_id: &str) -> Result<(), UpdateError> {
        let existed = self
            .store
            .models::<Filter>()
            .delete(filter_id)
            .await
            .map_err(|err| UpdateError::from_store(filter_id, err))?;
        if !existed {
            return Err(UpdateError::NotFound {
                filter_id: filter_id.to_string(),
            });
        }
        info!(%filter_id, "filter deleted");
        Ok(())
    }

    /// Apply `request` to the stored filter.
    ///
    /// Requests that change nothing return the current filter without writing
    /// or notifying. Otherwise the new filter is written only if the stored
    /// version still matches the one read, and observers are notified once the
    /// write has committed.
    #[instrument(skip_all, fields(filter_id = %request.filter_id))]
    pub async fn update(&self, request: UpdateFilterRequest) -> Result<Filter, UpdateError> {
        request.validate()?;
        let filter_id = request.filter_id.as_str();

        let current = self.get(filter_id).await?;
        let (filter, expected_version) = match plan(current, &request, &self.config)? {
            Plan::Unchanged(filter) => {
                debug!("update changes nothing, skipping write");
                return Ok(filter);
            }
            Plan::Write {
                filter,
                expected_version,
            } => (filter, expected_version),
        };

        let written = self
            .store
            .models::<Filter>()
            .update(&filter, expected_version)
            .await
            .map_err(|err| {
                match &err {
                    ModelError::ConcurrencyConflict { actual, .. } => {
                        warn!(expected_version, actual, "filter modified concurrently")
                    }
                    other => error!(expected_version, error = %other, "filter write failed"),
                }
                UpdateError::from_store(filter_id, err)
            })?;

        let change = FilterChange {
            filter: written.data,
            version: written.version,
            added: request.add_items,
            removed: request.remove_items,
        };

        if let Err(err) = self.notifier.notify_filter_changed(&change).await {
            warn!(version = change.version, error = %err, "filter written but change notification failed");
            return Err(err.into());
        }

        info!(
            version = change.version,
            added = change.added.len(),
            removed = change.removed.len(),
            "filter updated"
        );
        Ok(change.filter)
    }
}
