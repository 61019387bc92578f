//! Versioned filters with optimistic-concurrency updates.
//!
//! A [`Filter`] is a named set of unique items with a description, stored in
//! a [`ModelStore`] alongside a version. [`FilterService::update`] reads the
//! filter, plans the requested change, writes it back only if nobody else
//! wrote in between, and then tells a [`ChangeNotifier`] what changed.

#[cfg(feature = "bus")]
pub mod bus;
pub mod config;
pub mod filter;
pub mod model;
pub mod notify;
pub mod service;

pub use config::{ConfigError, FilterConfig};
pub use filter::{
    check_limits, plan, validate_filter_id, Filter, Plan, UpdateError, UpdateFilterRequest,
    ValidationError,
};
pub use model::{InMemoryModelStore, Model, ModelError, ModelRepository, ModelStore, ModelsExt, Versioned};
#[cfg(feature = "bus")]
pub use notify::BusNotifier;
#[cfg(feature = "emitter")]
pub use notify::EmitterNotifier;
pub use notify::{ChangeNotifier, FilterChange, FilterChanged, NoopNotifier, NotifyError};
pub use service::FilterService;

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
