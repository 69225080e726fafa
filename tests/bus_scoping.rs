//! Bus delivery semantics: scope isolation, wildcard vs exact subscriptions,
//! and malformed-payload drops, exercised over the in-memory transport.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use tldr_worker::prelude::*;

/// Collects every payload a subscription receives.
#[derive(Clone, Default)]
struct Inbox {
    received: Arc<Mutex<Vec<Value>>>,
}

impl Inbox {
    fn handler(&self) -> tldr_worker::infrastructure::bus::Handler {
        let received = self.received.clone();
        handler(move |payload| {
            let received = received.clone();
            async move {
                received.lock().unwrap().push(payload);
            }
        })
    }

    fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

#[tokio::test]
async fn scopes_sharing_one_transport_are_isolated() {
    let bus = Arc::new(InMemoryBus::new());
    let scope_a = ScopedBus::new(bus.clone(), "test");
    let scope_b = ScopedBus::new(bus.clone(), "production");

    let inbox_a = Inbox::default();
    let inbox_b = Inbox::default();
    scope_a.subscribe("content.created", inbox_a.handler()).await.unwrap();
    scope_b.subscribe("content.created", inbox_b.handler()).await.unwrap();

    scope_a.publish("content.created", &json!({"id": 1})).await;

    assert_eq!(inbox_a.count(), 1);
    assert_eq!(inbox_b.count(), 0);

    scope_b.publish("content.created", &json!({"id": 2})).await;

    assert_eq!(inbox_a.count(), 1);
    assert_eq!(inbox_b.count(), 1);
}

#[tokio::test]
async fn wildcard_subscription_receives_all_channels_under_prefix() {
    let bus = Arc::new(InMemoryBus::new());
    let scoped = ScopedBus::new(bus, "test");

    let inbox = Inbox::default();
    scoped.subscribe("content.*", inbox.handler()).await.unwrap();

    scoped.publish("content.created", &json!({"n": 1})).await;
    scoped.publish("content.updated", &json!({"n": 2})).await;
    scoped.publish("user.created", &json!({"n": 3})).await;

    assert_eq!(inbox.count(), 2);
}

#[tokio::test]
async fn exact_subscription_ignores_sibling_channels() {
    let bus = Arc::new(InMemoryBus::new());
    let scoped = ScopedBus::new(bus, "test");

    let inbox = Inbox::default();
    scoped.subscribe("content.created", inbox.handler()).await.unwrap();

    scoped.publish("content.created", &json!({"n": 1})).await;
    scoped.publish("content.updated", &json!({"n": 2})).await;

    assert_eq!(inbox.count(), 1);
}

#[tokio::test]
async fn payload_survives_the_wire_intact() {
    let bus = Arc::new(InMemoryBus::new());
    let scoped = ScopedBus::new(bus, "test");

    let inbox = Inbox::default();
    scoped.subscribe("content.created", inbox.handler()).await.unwrap();

    let payload = json!({
        "record": { "id": 42, "nested": { "tags": ["a", "b"], "score": 1.5 } }
    });
    scoped.publish("content.created", &payload).await;

    let received = inbox.received.lock().unwrap();
    assert_eq!(received.as_slice(), &[payload]);
}

#[tokio::test]
async fn malformed_payload_is_dropped_without_stopping_delivery() {
    let bus = Arc::new(InMemoryBus::new());
    let scoped = ScopedBus::new(bus.clone(), "test");

    let inbox = Inbox::default();
    scoped.subscribe("content.created", inbox.handler()).await.unwrap();

    bus.publish_raw("test:content.created", "{not valid json").await;
    assert_eq!(inbox.count(), 0);

    scoped.publish("content.created", &json!({"ok": true})).await;
    assert_eq!(inbox.count(), 1);
}
