//! Message bus trait and error types.

use super::pattern::ChannelPattern;
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Errors that can occur while setting up the bus.
///
/// Per-message transport failures are not represented here: publish is
/// fire-and-forget and delivery problems surface only as undelivered
/// messages, logged by the implementation.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Bus connection error: {0}")]
    ConnectionError(String),

    #[error("Bus subscription error: {0}")]
    SubscriptionError(String),
}

/// Result type for bus operations.
pub type BusResult<T> = Result<T, BusError>;

/// Future returned by a subscription handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// A subscription handler: receives the decoded payload of each delivery.
pub type Handler = Arc<dyn Fn(Value) -> HandlerFuture + Send + Sync>;

/// Publish/subscribe over named channels.
///
/// Wire format is channel name + UTF-8 JSON text. Publish serializes the
/// payload and transmits it tagged with the exact channel name; it must not
/// block the caller beyond serialization and offers no delivery confirmation.
/// A delivered payload that fails to decode is dropped with a warning and
/// must not stop subsequent deliveries.
///
/// # Implementations
///
/// - [`crate::infrastructure::bus::RedisBus`] - Redis pub/sub transport
/// - [`crate::infrastructure::bus::InMemoryBus`] - in-process transport for tests
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publishes a payload on a channel.
    ///
    /// Fail-open: transport errors are logged and do not propagate. The
    /// message is simply lost, matching plain pub/sub semantics.
    async fn publish(&self, channel: &str, payload: &Value);

    /// Registers a handler for every channel matched by `pattern`.
    ///
    /// The handler fires once per delivery whose channel falls within the
    /// pattern, and only for deliveries arriving under this exact pattern
    /// identity (see [`ChannelPattern::source`]).
    ///
    /// # Errors
    ///
    /// Returns [`BusError::SubscriptionError`] if the transport-level
    /// subscription cannot be established.
    async fn subscribe(&self, pattern: ChannelPattern, handler: Handler) -> BusResult<()>;
}

/// Wraps an async closure into the boxed [`Handler`] shape.
pub fn handler<F, Fut>(f: F) -> Handler
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |payload| Box::pin(f(payload)) as HandlerFuture)
}
