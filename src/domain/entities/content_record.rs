//! Content record entity ("tldr").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A summarized piece of content, keyed for deduplication by URL.
///
/// `canonical_url` is the single normalized URL chosen to represent the
/// underlying article; `alias_urls` is the set of all URLs known to point at
/// the same article. Invariant: `canonical_url` is always a member of
/// `alias_urls`. Both mutation paths in this crate (redirect resolution and
/// alias merging) preserve it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ContentRecord {
    pub id: i64,
    /// Normalized deduplication key.
    pub canonical_url: String,
    /// The URL exactly as first submitted.
    pub original_url: String,
    /// All URLs known to be equivalent to `canonical_url`. Unique,
    /// order-irrelevant.
    pub alias_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Creates a record, enforcing the canonical-in-aliases invariant.
    pub fn new(
        id: i64,
        canonical_url: String,
        original_url: String,
        mut alias_urls: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        if !alias_urls.contains(&canonical_url) {
            alias_urls.push(canonical_url.clone());
        }
        Self {
            id,
            canonical_url,
            original_url,
            alias_urls,
            created_at,
        }
    }

    /// Whether any URL in `urls` is already an alias of this record.
    pub fn has_any_alias(&self, urls: &[String]) -> bool {
        urls.iter().any(|u| self.alias_urls.contains(u))
    }
}

/// Field-level patch for a record's URL set.
///
/// Narrow by design: persistence applies it as a set-add plus optional
/// canonical replacement rather than a whole-document overwrite, keeping the
/// update idempotent and duplicate-tolerant under concurrent or repeated
/// application.
#[derive(Debug, Clone, Default)]
pub struct AliasPatch {
    pub set_canonical_url: Option<String>,
    pub add_aliases: Vec<String>,
}
