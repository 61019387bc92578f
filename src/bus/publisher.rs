//! Event envelope plus the publisher and subscriber seams of the bus.

/// A message on the bus: an id unique per committed change, a type used for
/// routing, an opaque payload and free-form headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub event_type: String,
    pub payload: Vec<u8>,
    pub metadata: Vec<(String, String)>,
}

impl Event {
    pub fn new(id: impl Into<String>, event_type: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            payload,
            metadata: Vec::new(),
        }
    }

    /// Build an event whose payload is `payload` in bitcode form.
    pub fn encode<T: serde::Serialize>(
        id: impl Into<String>,
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, PublishError> {
        let bytes = bitcode::serialize(payload)?;
        Ok(Self::new(id, event_type, bytes))
    }

    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, PublishError> {
        Ok(bitcode::deserialize(&self.payload)?)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    /// First header named `key`.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("event payload codec failed: {0}")]
    Codec(#[from] bitcode::Error),
    /// The bus could not be reached or is in a broken state.
    #[error("bus unavailable: {0}")]
    Unavailable(String),
    #[error("event rejected: {0}")]
    Rejected(String),
}

/// Sink for outgoing events. Implementations return once the bus has
/// accepted the event.
pub trait Publisher: Send + Sync {
    fn publish(&self, event: Event) -> Result<(), PublishError>;

    /// Publish in order, stopping at the first failure.
    fn publish_batch(&self, events: Vec<Event>) -> Result<(), PublishError> {
        events.into_iter().try_for_each(|event| self.publish(event))
    }
}

/// Source of incoming events.
pub trait Subscriber: Send + Sync {
    /// Next unread event, waiting up to `timeout_ms` for one to arrive.
    fn poll(&self, timeout_ms: u64) -> Result<Option<Event>, PublishError>;

    fn ack(&self, event_id: &str) -> Result<(), PublishError>;
}
