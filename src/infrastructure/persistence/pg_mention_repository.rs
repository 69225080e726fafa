//! PostgreSQL implementation of the mention repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Mention;
use crate::domain::repositories::MentionRepository;
use crate::error::AppError;

/// PostgreSQL repository for external mention records.
pub struct PgMentionRepository {
    pool: Arc<PgPool>,
}

impl PgMentionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MentionRepository for PgMentionRepository {
    async fn find_by_any_url(&self, urls: &[String]) -> Result<Vec<Mention>, AppError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let mentions = sqlx::query_as::<_, Mention>(
            r#"
            SELECT id, urls
            FROM mentions
            WHERE urls && $1
            ORDER BY id
            "#,
        )
        .bind(urls)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(mentions)
    }
}
