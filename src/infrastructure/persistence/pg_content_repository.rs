//! PostgreSQL implementation of the content repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AliasPatch, ContentRecord};
use crate::domain::repositories::ContentRepository;
use crate::error::AppError;

/// PostgreSQL repository for content records.
///
/// Alias sets are stored as `TEXT[]`; the alias-set update is a single
/// `UPDATE` using an array union, so it is duplicate-tolerant and idempotent
/// without a transaction.
pub struct PgContentRepository {
    pool: Arc<PgPool>,
}

impl PgContentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentRepository for PgContentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<ContentRecord>, AppError> {
        let record = sqlx::query_as::<_, ContentRecord>(
            r#"
            SELECT id, canonical_url, original_url, alias_urls, created_at
            FROM content_records
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn find_by_any_alias(&self, urls: &[String]) -> Result<Vec<ContentRecord>, AppError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, ContentRecord>(
            r#"
            SELECT id, canonical_url, original_url, alias_urls, created_at
            FROM content_records
            WHERE alias_urls && $1
            ORDER BY id
            "#,
        )
        .bind(urls)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }

    async fn update_alias_set(&self, id: i64, patch: AliasPatch) -> Result<(), AppError> {
        // The new canonical URL joins the alias set too, keeping the
        // canonical-in-aliases invariant inside one statement.
        let mut add = patch.add_aliases;
        if let Some(canonical) = &patch.set_canonical_url {
            if !add.contains(canonical) {
                add.push(canonical.clone());
            }
        }

        let result = sqlx::query(
            r#"
            UPDATE content_records
            SET canonical_url = COALESCE($2, canonical_url),
                alias_urls = ARRAY(SELECT DISTINCT u FROM unnest(alias_urls || $3) AS t(u))
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.set_canonical_url)
        .bind(&add)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "Content record not found",
                json!({ "id": id }),
            ));
        }

        Ok(())
    }
}
