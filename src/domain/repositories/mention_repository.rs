//! Repository trait for external mention lookups.

use crate::domain::entities::Mention;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only repository interface for external cross-reference records.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMentionRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MentionRepository: Send + Sync {
    /// Finds every mention whose tracked URL set intersects `urls`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_any_url(&self, urls: &[String]) -> Result<Vec<Mention>, AppError>;
}
