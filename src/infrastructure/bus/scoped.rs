//! Deployment-scoped bus client.

use super::pattern::ChannelPattern;
use super::service::{BusResult, Handler, MessageBus};
use serde_json::Value;
use std::sync::Arc;

/// Wraps a [`MessageBus`] with a deployment scope.
///
/// Every channel name is mapped to `scope:channel` on both publish and
/// subscribe, so test, staging, and production deployments can share one
/// physical transport without observing each other's traffic. That isolation
/// is this type's sole job; it adds no other behavior.
#[derive(Clone)]
pub struct ScopedBus {
    bus: Arc<dyn MessageBus>,
    scope: String,
}

impl ScopedBus {
    /// Creates a scoped client over a shared transport.
    pub fn new(bus: Arc<dyn MessageBus>, scope: impl Into<String>) -> Self {
        Self {
            bus,
            scope: scope.into(),
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn scoped_channel(&self, channel: &str) -> String {
        format!("{}:{}", self.scope, channel)
    }

    /// Publishes on `scope:channel`. Fire-and-forget, like the underlying bus.
    pub async fn publish(&self, channel: &str, payload: &Value) {
        self.bus.publish(&self.scoped_channel(channel), payload).await;
    }

    /// Subscribes to `scope:pattern`.
    ///
    /// # Errors
    ///
    /// Propagates [`super::service::BusError`] from the underlying transport.
    pub async fn subscribe(&self, pattern: &str, handler: Handler) -> BusResult<()> {
        let scoped = ChannelPattern::parse(&self.scoped_channel(pattern));
        self.bus.subscribe(scoped, handler).await
    }
}
