//! Repository trait for content record data access.

use crate::domain::entities::{AliasPatch, ContentRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for content records.
///
/// This worker never creates or deletes records; their lifecycle belongs to
/// the platform's CRUD layer. The surface here is exactly what the redirect
/// service and alias merger need: identity lookup, alias-intersection lookup,
/// and the narrow alias-set update.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgContentRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Finds a record by its identity.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>, AppError>;

    /// Finds every record whose alias set intersects `urls`.
    ///
    /// In practice at most one record should match; returning all matches
    /// lets the caller detect the ambiguous case instead of silently picking
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_any_alias(&self, urls: &[String]) -> Result<Vec<ContentRecord>, AppError>;

    /// Applies a field-level patch to a record's URL set.
    ///
    /// `add_aliases` has set-add semantics: members already present are
    /// ignored, so repeated application with the same or overlapping sets is
    /// idempotent. When `set_canonical_url` is present the new canonical URL
    /// is also added to the alias set, preserving the canonical-in-aliases
    /// invariant.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record has `id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_alias_set(&self, id: i64, patch: AliasPatch) -> Result<(), AppError>;
}
