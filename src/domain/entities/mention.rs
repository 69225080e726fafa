//! External cross-reference entity.

use serde::{Deserialize, Serialize};

/// An external mention of some article, e.g. a social-media post whose
/// shortened link was unshortened upstream.
///
/// `urls` is the set of URLs this mention is known to track; when it
/// intersects a content record's alias set, the whole set is folded into
/// that record by the alias merger.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Mention {
    pub id: i64,
    pub urls: Vec<String>,
}
