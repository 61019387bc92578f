//! Service bus for filter change events.
//!
//! Filter changes leave the process as [`Event`]s handed to a [`Publisher`].
//! Consumers pull them back out through a [`Subscriber`].
//!
//! ```text
//! FilterService ──update──▶ BusNotifier ──publish──▶ Publisher
//!                                                      │
//!                              ┌───────────────────────┼─────────────────────┐
//!                              ▼                       ▼                     ▼
//!                       InMemoryQueue            KafkaPublisher       NatsPublisher
//!                        (included)               (external)           (external)
//! ```
//!
//! ## Example
//!
//! ```
//! use sourced_filters::bus::{Event, InMemoryQueue, Publisher, Subscriber};
//!
//! let queue = InMemoryQueue::new();
//! queue.publish(Event::new("f1:v2", "filter.changed", b"{}".to_vec())).unwrap();
//!
//! let event = queue.poll(10).unwrap().unwrap();
//! assert_eq!(event.event_type, "filter.changed");
//! ```

mod in_memory_queue;
mod publisher;

pub use in_memory_queue::InMemoryQueue;
pub use publisher::{Event, PublishError, Publisher, Subscriber};
