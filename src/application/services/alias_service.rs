//! Equivalence-class merging of URL alias sets.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{AliasPatch, ContentRecord};
use crate::domain::repositories::{ContentRepository, MentionRepository};
use crate::error::AppError;

/// Result of folding an alias set into the content store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No record references any member of the set; nothing was mutated. The
    /// set refers to a resource this system doesn't know yet.
    NoMatch,
    /// Exactly one record matched and was patched. `added` counts aliases
    /// that were not already present; zero means the call was a no-op.
    Merged { id: i64, added: usize },
    /// More than one record shares an alias with the set: a pre-existing
    /// data inconsistency. Nothing was mutated; the caller decides.
    Ambiguous { ids: Vec<i64> },
}

/// Keeps alias sets consistent across content records.
///
/// Both operations are set-unions onto one record, so repeated application
/// with the same or overlapping inputs produces no further change. That
/// idempotence is the sole correctness defense against duplicate or
/// out-of-order delivery; there are no locks or transactions here.
pub struct AliasService<C: ContentRepository, M: MentionRepository> {
    content_repository: Arc<C>,
    mention_repository: Arc<M>,
}

impl<C, M> AliasService<C, M>
where
    C: ContentRepository,
    M: MentionRepository,
{
    /// Creates a new alias service.
    pub fn new(content_repository: Arc<C>, mention_repository: Arc<M>) -> Self {
        Self {
            content_repository,
            mention_repository,
        }
    }

    /// Folds an externally asserted equivalence class into whichever record
    /// already references any of its members.
    ///
    /// # Errors
    ///
    /// Lookup and update errors propagate, unlike the rest of the pipeline:
    /// merge callers (e.g. a scheduled job) may want to log or retry.
    pub async fn merge(&self, alias_set: &[String]) -> Result<MergeOutcome, AppError> {
        if alias_set.is_empty() {
            return Ok(MergeOutcome::NoMatch);
        }

        let mut matches = self.content_repository.find_by_any_alias(alias_set).await?;

        match matches.len() {
            0 => Ok(MergeOutcome::NoMatch),
            1 => {
                let record = matches.remove(0);
                let to_add: Vec<String> = alias_set
                    .iter()
                    .filter(|url| !record.alias_urls.contains(url))
                    .cloned()
                    .collect();

                let added = to_add.len();
                if added > 0 {
                    self.content_repository
                        .update_alias_set(
                            record.id,
                            AliasPatch {
                                set_canonical_url: None,
                                add_aliases: to_add,
                            },
                        )
                        .await?;
                }

                debug!("Merged {} new aliases into record {}", added, record.id);
                Ok(MergeOutcome::Merged {
                    id: record.id,
                    added,
                })
            }
            _ => {
                let ids: Vec<i64> = matches.iter().map(|r| r.id).collect();
                debug!("Alias set matches multiple records {:?}, leaving untouched", ids);
                Ok(MergeOutcome::Ambiguous { ids })
            }
        }
    }

    /// Unions the URL sets of every external mention that intersects the
    /// record's aliases into the record.
    ///
    /// Multiple mentions may contribute disjoint URL sets; all are folded
    /// into one update. Returns the number of aliases added.
    ///
    /// # Errors
    ///
    /// Lookup and update errors propagate to the caller.
    pub async fn reconcile_from_mentions(
        &self,
        record: &ContentRecord,
    ) -> Result<usize, AppError> {
        let mentions = self
            .mention_repository
            .find_by_any_url(&record.alias_urls)
            .await?;

        let mut union: Vec<String> = Vec::new();
        for mention in mentions {
            for url in mention.urls {
                if !record.alias_urls.contains(&url) && !union.contains(&url) {
                    union.push(url);
                }
            }
        }

        let added = union.len();
        if added > 0 {
            self.content_repository
                .update_alias_set(
                    record.id,
                    AliasPatch {
                        set_canonical_url: None,
                        add_aliases: union,
                    },
                )
                .await?;
        }

        debug!("Folded {} mention URLs into record {}", added, record.id);
        Ok(added)
    }
}
