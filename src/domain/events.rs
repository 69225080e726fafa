//! Bus event types published by the write path.

use crate::domain::entities::ContentRecord;
use serde::{Deserialize, Serialize};

/// Channel the write path publishes creation events on (before scoping).
pub const CONTENT_CREATED_CHANNEL: &str = "content.created";

/// Wildcard pattern covering every content event.
pub const CONTENT_EVENTS_PATTERN: &str = "content.*";

/// Payload of a `content.created` delivery.
///
/// Carries the freshly persisted record. Ephemeral: created at publish time,
/// consumed at most once per live subscriber, never persisted. The record may
/// be stale by the time a subscriber acts on it, so side-effect consumers
/// re-fetch by id before mutating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCreated {
    pub record: ContentRecord,
}

impl ContentCreated {
    pub fn new(record: ContentRecord) -> Self {
        Self { record }
    }
}
