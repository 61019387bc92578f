use async_trait::async_trait;

use crate::bus::{Event, Publisher};

use super::{ChangeNotifier, FilterChange, NotifyError};
use crate::config::FilterConfig;

/// Publishes each filter change as a bitcode-encoded [`FilterChanged`](super::FilterChanged)
/// event. Event ids are `"<filter_id>:v<version>"`, unique per committed write.
pub struct BusNotifier<P> {
    publisher: P,
    event_type: String,
}

impl<P: Publisher> BusNotifier<P> {
    pub fn new(publisher: P, event_type: impl Into<String>) -> Self {
        Self {
            publisher,
            event_type: event_type.into(),
        }
    }

    /// Publish under [`FilterConfig::event_type`].
    pub fn from_config(publisher: P, config: &FilterConfig) -> Self {
        Self::new(publisher, config.event_type.clone())
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }
}

#[async_trait]
impl<P: Publisher> ChangeNotifier for BusNotifier<P> {
    async fn notify_filter_changed(&self, change: &FilterChange) -> Result<(), NotifyError> {
        let id = format!("{}:v{}", change.filter.id(), change.version);
        let event = Event::encode(id, &self.event_type, &change.to_event())?
            .with_metadata("filter-id", change.filter.id())
            .with_metadata("version", change.version.to_string());

        self.publisher.publish(event)?;
        Ok(())
    }
}
