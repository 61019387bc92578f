use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use event_emitter_rs::EventEmitter;

use super::{ChangeNotifier, FilterChange, NotifyError};
use crate::config::FilterConfig;

/// Fans filter changes out to in-process listeners as JSON strings.
///
/// Listeners run on the emitter's own threads and are joined from tokio's
/// blocking pool. A change is only reported as delivered once every listener
/// has returned.
pub struct EmitterNotifier {
    emitter: Arc<Mutex<EventEmitter>>,
    event_type: String,
}

impl EmitterNotifier {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            emitter: Arc::new(Mutex::new(EventEmitter::new())),
            event_type: event_type.into(),
        }
    }

    /// Emit under [`FilterConfig::event_type`].
    pub fn from_config(config: &FilterConfig) -> Self {
        Self::new(config.event_type.clone())
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Register a listener for filter changes. Returns the listener id.
    pub fn on<F>(&self, listener: F) -> Result<String, NotifyError>
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| NotifyError::Rejected("emitter lock poisoned".into()))?;
        Ok(emitter.on(&self.event_type, listener))
    }
}

#[async_trait]
impl ChangeNotifier for EmitterNotifier {
    async fn notify_filter_changed(&self, change: &FilterChange) -> Result<(), NotifyError> {
        let payload = serde_json::to_string(&change.to_event())
            .map_err(|e| NotifyError::Encode(e.to_string()))?;

        let emitter = Arc::clone(&self.emitter);
        let event_type = self.event_type.clone();

        tokio::task::spawn_blocking(move || {
            let handles = emitter
                .lock()
                .map_err(|_| NotifyError::Rejected("emitter lock poisoned".into()))?
                .emit(&event_type, payload);

            for handle in handles {
                handle
                    .join()
                    .map_err(|_| NotifyError::Rejected("filter change listener panicked".into()))?;
            }
            Ok::<(), NotifyError>(())
        })
        .await
        .map_err(|e| NotifyError::Rejected(format!("filter change delivery task failed: {}", e)))??;

        Ok(())
    }
}
