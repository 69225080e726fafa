//! In-process message bus implementation.
//!
//! Mirrors the Redis transport's wire semantics (payloads are serialized to
//! JSON text on publish and decoded on delivery) so tests exercise the same
//! encode/decode path, including the malformed-payload drop behavior.

use super::pattern::ChannelPattern;
use super::service::{BusResult, Handler, MessageBus};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;
use tracing::warn;

struct Registration {
    pattern: ChannelPattern,
    handler: Handler,
}

/// In-memory transport for tests and bus-less runs.
///
/// Deliveries are dispatched inline on the publishing task, so a test can
/// publish and then immediately assert on handler effects without sleeping.
#[derive(Default)]
pub struct InMemoryBus {
    registrations: Mutex<Vec<Registration>>,
}

impl InMemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transmits raw text on a channel, bypassing serialization.
    ///
    /// Lets tests inject non-JSON payloads to exercise the decode-failure
    /// drop path.
    pub async fn publish_raw(&self, channel: &str, text: &str) {
        let matched: Vec<Handler> = {
            let registrations = self.registrations.lock().unwrap();
            registrations
                .iter()
                .filter(|r| r.pattern.matches(channel))
                .map(|r| r.handler.clone())
                .collect()
        };

        for handler in matched {
            let payload: Value = match serde_json::from_str(text) {
                Ok(v) => v,
                Err(e) => {
                    warn!("Dropping malformed bus payload on {}: {}", channel, e);
                    continue;
                }
            };
            handler(payload).await;
        }
    }
}

#[async_trait]
impl MessageBus for InMemoryBus {
    async fn publish(&self, channel: &str, payload: &Value) {
        let text = payload.to_string();
        self.publish_raw(channel, &text).await;
    }

    async fn subscribe(&self, pattern: ChannelPattern, handler: Handler) -> BusResult<()> {
        self.registrations
            .lock()
            .unwrap()
            .push(Registration { pattern, handler });
        Ok(())
    }
}
