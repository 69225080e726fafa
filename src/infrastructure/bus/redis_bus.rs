//! Redis-backed message bus implementation.

use super::pattern::ChannelPattern;
use super::service::{BusError, BusResult, Handler, MessageBus};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde_json::Value;
use tokio_stream::StreamExt;
use tracing::{debug, info, warn};

/// Redis pub/sub transport.
///
/// Publishing goes through a pooled `ConnectionManager`; each subscription
/// opens its own dedicated pub/sub connection (Redis connections in subscribe
/// mode cannot issue other commands) and runs its delivery loop on a spawned
/// task. The bus is an owned value with an explicit [`RedisBus::connect`]
/// constructor; callers share it via `Arc`.
///
/// All publish-side operations are fail-open: errors are logged but don't
/// propagate to callers.
pub struct RedisBus {
    client: Client,
    publisher: ConnectionManager,
}

impl RedisBus {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> BusResult<Self> {
        info!("Connecting to Redis bus at {}", redis_url);

        let client = Client::open(redis_url).map_err(|e| {
            BusError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client.clone())
            .await
            .map_err(|e| BusError::ConnectionError(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| BusError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis bus");

        Ok(Self {
            client,
            publisher: manager,
        })
    }
}

#[async_trait]
impl MessageBus for RedisBus {
    async fn publish(&self, channel: &str, payload: &Value) {
        let text = payload.to_string();
        let mut conn = self.publisher.clone();

        match conn.publish::<_, _, i64>(channel, text).await {
            Ok(receivers) => {
                debug!("Bus PUBLISH {} ({} receivers)", channel, receivers);
            }
            Err(e) => {
                warn!("Bus PUBLISH error on {}: {}", channel, e);
            }
        }
    }

    async fn subscribe(&self, pattern: ChannelPattern, handler: Handler) -> BusResult<()> {
        let mut pubsub = self.client.get_async_pubsub().await.map_err(|e| {
            BusError::SubscriptionError(format!("Failed to open pub/sub connection: {}", e))
        })?;

        let subscribed = if pattern.is_wildcard() {
            pubsub.psubscribe(pattern.source()).await
        } else {
            pubsub.subscribe(pattern.source()).await
        };
        subscribed.map_err(|e| {
            BusError::SubscriptionError(format!("Failed to subscribe to {}: {}", pattern, e))
        })?;

        info!("Bus SUBSCRIBE {}", pattern);

        tokio::spawn(async move {
            let mut stream = pubsub.into_on_message();

            while let Some(msg) = stream.next().await {
                let channel = msg.get_channel_name().to_string();

                // A delivery arriving under a different pattern identity than
                // the one registered belongs to another subscription sharing
                // this connection's prefix; skip it.
                let delivered_pattern: Option<String> = msg.get_pattern().unwrap_or(None);
                match delivered_pattern {
                    Some(p) if p != pattern.source() => continue,
                    None if pattern.is_wildcard() => continue,
                    None if channel != pattern.source() => continue,
                    _ => {}
                }

                if !pattern.matches(&channel) {
                    continue;
                }

                let text: String = match msg.get_payload() {
                    Ok(t) => t,
                    Err(e) => {
                        warn!("Bus delivery on {} has non-text payload: {}", channel, e);
                        continue;
                    }
                };

                let payload: Value = match serde_json::from_str(&text) {
                    Ok(v) => v,
                    Err(e) => {
                        warn!("Dropping malformed bus payload on {}: {}", channel, e);
                        continue;
                    }
                };

                debug!("Bus DELIVER {} (pattern {})", channel, pattern);
                handler(payload).await;
            }

            debug!("Bus subscription {} closed", pattern);
        });

        Ok(())
    }
}
