//! In-process activity bus backed by a `tokio::sync::broadcast` channel.
//!
//! Publishing never blocks and never fails: the activity log is
//! write-only from the request path, and losing an entry must not fail the
//! operation that produced it.

use chrono::{DateTime, Utc};
use memorial_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Something worth recording in the activity log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Dot-separated action name, e.g. `"candle.approved"`.
    pub action: String,

    /// Who did it (`"visitor"`, `"admin"`, `"chat_moderator"`).
    pub actor: String,

    pub candle_id: Option<DbId>,

    /// Free-form JSON details.
    pub details: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(action: impl Into<String>, actor: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            actor: actor.into(),
            candle_id: None,
            details: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_candle(mut self, candle_id: DbId) -> Self {
        self.candle_id = Some(candle_id);
        self
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }
}

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out bus, shared as `Arc<EventBus>`.
pub struct EventBus {
    sender: broadcast::Sender<ActivityEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers observe `RecvError::Lagged` once the buffer is full.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: ActivityEvent) {
        // A send error only means there are no receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActivityEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
