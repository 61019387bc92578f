//! Filter Service: the entry point for reading and changing filters.
//!
//! `FilterService<S, N>` ties a [`ModelStore`](crate::ModelStore) to a
//! [`ChangeNotifier`](crate::ChangeNotifier). With the `http` feature the
//! service can also be exposed as an axum router.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use sourced_filters::{bus::InMemoryQueue, BusNotifier, FilterService, InMemoryModelStore};
//!
//! let queue = InMemoryQueue::new();
//! let service = Arc::new(FilterService::new(
//!     InMemoryModelStore::new(),
//!     BusNotifier::new(queue.clone(), "filter.changed"),
//! ));
//!
//! // Serve over HTTP (feature = "http")
//! sourced_filters::service::serve(service, "0.0.0.0:3000").await?;
//! ```

mod filter_service;
#[cfg(feature = "http")]
mod http;

pub use filter_service::FilterService;
#[cfg(feature = "http")]
pub use http::{router, serve, PutFilterBody, UpdateFilterBody};
