use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::{Duration, Instant};

use super::{Event, PublishError, Publisher, Subscriber};

/// Single-process bus. Every clone appends to the same log; each handle made
/// with [`InMemoryQueue::new_subscriber`] reads it from the start at its own pace.
#[derive(Clone, Default)]
pub struct InMemoryQueue {
    log: Arc<RwLock<Vec<Event>>>,
    cursor: Arc<Mutex<usize>>,
    acked: Arc<Mutex<Vec<String>>>,
}

fn poisoned<T>(_: PoisonError<T>) -> PublishError {
    PublishError::Unavailable("in-memory queue lock poisoned".into())
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another reader over the same log, starting at the first event.
    pub fn new_subscriber(&self) -> Self {
        Self {
            log: Arc::clone(&self.log),
            ..Self::default()
        }
    }

    /// Snapshot of everything published so far.
    pub fn events(&self) -> Vec<Event> {
        self.log.read().map(|log| log.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.log.read().map(|log| log.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ids acknowledged through this handle.
    pub fn acknowledged(&self) -> Vec<String> {
        self.acked.lock().map(|acked| acked.clone()).unwrap_or_default()
    }
}

impl Publisher for InMemoryQueue {
    fn publish(&self, event: Event) -> Result<(), PublishError> {
        self.log.write().map_err(poisoned)?.push(event);
        Ok(())
    }

    fn publish_batch(&self, events: Vec<Event>) -> Result<(), PublishError> {
        self.log.write().map_err(poisoned)?.extend(events);
        Ok(())
    }
}

impl Subscriber for InMemoryQueue {
    fn poll(&self, timeout_ms: u64) -> Result<Option<Event>, PublishError> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            {
                let log = self.log.read().map_err(poisoned)?;
                let mut cursor = self.cursor.lock().map_err(poisoned)?;
                if let Some(event) = log.get(*cursor) {
                    *cursor += 1;
                    return Ok(Some(event.clone()));
                }
            }

            if Instant::now() >= deadline {
                return Ok(None);
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    fn ack(&self, event_id: &str) -> Result<(), PublishError> {
        self.acked.lock().map_err(poisoned)?.push(event_id.to_string());
        Ok(())
    }
}
