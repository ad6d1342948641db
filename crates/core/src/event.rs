//! Session event stream — the presentation boundary.
//!
//! The orchestration loop publishes an event for every conversation delta
//! it produces; presentation layers (the CLI today) subscribe and decide
//! rendering and verbosity. The core never prints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Everything a presentation layer can observe about one loop invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The model requested a tool call
    ToolRequested {
        call_id: String,
        tool_name: String,
        timestamp: DateTime<Utc>,
    },

    /// A tool call finished (successfully or not)
    ToolCompleted {
        call_id: String,
        tool_name: String,
        success: bool,
        duration_ms: u64,
        timestamp: DateTime<Utc>,
    },

    /// The model produced an assistant output
    ResponseGenerated {
        conversation_id: String,
        model: String,
        tokens_used: u32,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for session events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub. Publishing
/// with no subscribers is fine — the loop never blocks on presentation.
pub struct EventBus {
    sender: broadcast::Sender<Arc<SessionEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: SessionEvent) {
        // Ignore send errors (no subscribers = that's fine)
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<SessionEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(SessionEvent::ToolCompleted {
            call_id: "call_1".into(),
            tool_name: "web_search".into(),
            success: true,
            duration_ms: 42,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            SessionEvent::ToolCompleted {
                tool_name, success, ..
            } => {
                assert_eq!(tool_name, "web_search");
                assert!(success);
            }
            _ => panic!("Expected ToolCompleted event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(SessionEvent::ResponseGenerated {
            conversation_id: "c1".into(),
            model: "gpt-4o".into(),
            tokens_used: 15,
            timestamp: Utc::now(),
        });
    }
}
