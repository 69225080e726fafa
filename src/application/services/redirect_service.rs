//! Redirect detection and canonical URL resolution.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::domain::entities::{AliasPatch, ContentRecord};
use crate::domain::events::{CONTENT_CREATED_CHANNEL, ContentCreated};
use crate::domain::offenders::match_offender;
use crate::domain::repositories::ContentRepository;
use crate::infrastructure::bus::{BusResult, ScopedBus, handler};
use crate::infrastructure::fetch::RedirectFetcher;
use crate::utils::url_normalizer::normalize_url;

const MOVED_PERMANENTLY: u16 = 301;
const FOUND: u16 = 302;

/// Terminal state of one reconciliation pass.
///
/// The bus path discards this; it exists so a direct caller (scheduler, test
/// harness) can assert on what happened without observing persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Not an offender URL, or the probe did not observe a resolvable
    /// redirect. Includes probe transport failures: there is deliberately no
    /// distinction between "definitely not a redirect" and a transient error.
    Ignored,
    /// The canonical URL was resolved and a persistence attempt was made.
    Resolved { canonical_url: String },
    /// The redirect looked right but the target could not be extracted,
    /// parsed, or attached to an existing record. Terminal, silent, no retry.
    Failed,
}

/// Resolves redirect-service URLs to their canonical targets.
///
/// Runs one single-pass state machine per content-creation event:
/// `Received → Matched? → Fetching → {Resolved | Ignored | Failed}`. The
/// whole flow is asynchronous relative to the creation request; nothing here
/// ever reports back to the writer.
pub struct RedirectService<C: ContentRepository, F: RedirectFetcher> {
    content_repository: Arc<C>,
    fetcher: Arc<F>,
}

impl<C, F> RedirectService<C, F>
where
    C: ContentRepository + 'static,
    F: RedirectFetcher + 'static,
{
    /// Creates a new redirect service.
    pub fn new(content_repository: Arc<C>, fetcher: Arc<F>) -> Self {
        Self {
            content_repository,
            fetcher,
        }
    }

    /// Subscribes the service to creation events on a scoped bus.
    ///
    /// The handler decodes each delivery into a [`ContentCreated`] event,
    /// runs [`Self::reconcile`], and logs the outcome. Undecodable payloads
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::infrastructure::bus::BusError`] if the
    /// subscription cannot be established.
    pub async fn subscribe(self: Arc<Self>, bus: &ScopedBus) -> BusResult<()> {
        let service = self.clone();

        bus.subscribe(
            CONTENT_CREATED_CHANNEL,
            handler(move |payload: Value| {
                let service = service.clone();
                async move {
                    let event: ContentCreated = match serde_json::from_value(payload) {
                        Ok(e) => e,
                        Err(e) => {
                            warn!("Dropping content.created delivery with unexpected shape: {}", e);
                            return;
                        }
                    };

                    let id = event.record.id;
                    let outcome = service.reconcile(&event.record).await;
                    debug!("Reconciled record {}: {:?}", id, outcome);
                }
            }),
        )
        .await
    }

    /// Runs one reconciliation pass over a creation event's record.
    ///
    /// The event's record may be stale; on resolution the authoritative
    /// record is re-fetched by id before the alias-set update. Persistence
    /// failures are swallowed (best-effort by design) and the outcome is
    /// still [`ReconcileOutcome::Resolved`].
    pub async fn reconcile(&self, record: &ContentRecord) -> ReconcileOutcome {
        // Matched?
        let Some(offender) = match_offender(&record.canonical_url) else {
            return ReconcileOutcome::Ignored;
        };

        debug!(
            "Record {} matches redirect service '{}', probing {}",
            record.id, offender.name, record.original_url
        );

        // Fetching
        let probe = match self.fetcher.fetch(&record.original_url).await {
            Ok(p) => p,
            Err(e) => {
                debug!("Probe for record {} failed, ignoring: {}", record.id, e);
                return ReconcileOutcome::Ignored;
            }
        };

        if probe.status != MOVED_PERMANENTLY && probe.status != FOUND {
            return ReconcileOutcome::Ignored;
        }

        let Some(location) = probe.location else {
            return ReconcileOutcome::Ignored;
        };

        if !offender.location_shape.is_match(&location) {
            return ReconcileOutcome::Ignored;
        }

        // Resolution
        let Ok(location_url) = Url::parse(&location) else {
            return ReconcileOutcome::Failed;
        };

        let Some(target) = (offender.extract_target)(&location_url) else {
            return ReconcileOutcome::Failed;
        };

        let canonical = match normalize_url(&target) {
            Ok(c) => c,
            Err(e) => {
                debug!("Target of record {} failed normalization: {}", record.id, e);
                return ReconcileOutcome::Failed;
            }
        };

        // Resolved: re-fetch the authoritative record, then patch it.
        let current = match self.content_repository.find_by_id(record.id).await {
            Ok(Some(r)) => r,
            Ok(None) => {
                debug!("Record {} vanished before resolution could be saved", record.id);
                return ReconcileOutcome::Failed;
            }
            Err(e) => {
                warn!("Lookup of record {} failed during resolution: {}", record.id, e);
                return ReconcileOutcome::Failed;
            }
        };

        let patch = AliasPatch {
            set_canonical_url: Some(canonical.clone()),
            add_aliases: vec![canonical.clone()],
        };

        if let Err(e) = self.content_repository.update_alias_set(current.id, patch).await {
            // Best-effort save; there is no caller waiting on this.
            warn!("Swallowing failed resolution save for record {}: {}", current.id, e);
        }

        ReconcileOutcome::Resolved {
            canonical_url: canonical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockContentRepository;
    use crate::infrastructure::fetch::{FetchError, MockRedirectFetcher, RedirectProbeResponse};
    use chrono::Utc;
    use serde_json::json;

    fn readability_record(id: i64) -> ContentRecord {
        ContentRecord::new(
            id,
            "http://readability.com/articles/x".to_string(),
            "http://readability.com/articles/x".to_string(),
            vec![],
            Utc::now(),
        )
    }

    fn plain_record(id: i64) -> ContentRecord {
        ContentRecord::new(
            id,
            "http://example.com/article".to_string(),
            "http://example.com/article".to_string(),
            vec![],
            Utc::now(),
        )
    }

    fn probe(status: u16, location: Option<&str>) -> RedirectProbeResponse {
        RedirectProbeResponse {
            status,
            location: location.map(|s| s.to_string()),
        }
    }

    #[tokio::test]
    async fn non_offender_is_ignored_without_fetch() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();
        fetcher.expect_fetch().times(0);
        repo.expect_find_by_id().times(0);
        repo.expect_update_alias_set().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&plain_record(1)).await;

        assert_eq!(outcome, ReconcileOutcome::Ignored);
    }

    #[tokio::test]
    async fn non_redirect_status_is_ignored() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(probe(200, None)));
        repo.expect_update_alias_set().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(1)).await;

        assert_eq!(outcome, ReconcileOutcome::Ignored);
    }

    #[tokio::test]
    async fn missing_location_is_ignored() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(probe(301, None)));
        repo.expect_update_alias_set().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(1)).await;

        assert_eq!(outcome, ReconcileOutcome::Ignored);
    }

    #[tokio::test]
    async fn unexpected_location_shape_is_ignored() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(probe(301, Some("http://elsewhere.example/read?url=x"))));
        repo.expect_update_alias_set().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(1)).await;

        assert_eq!(outcome, ReconcileOutcome::Ignored);
    }

    #[tokio::test]
    async fn probe_error_is_ignored() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Err(FetchError("timed out".to_string())));
        repo.expect_update_alias_set().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(1)).await;

        assert_eq!(outcome, ReconcileOutcome::Ignored);
    }

    #[tokio::test]
    async fn location_without_url_param_fails() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(probe(301, Some("http://www.readability.com/read?other=1"))));
        repo.expect_update_alias_set().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(1)).await;

        assert_eq!(outcome, ReconcileOutcome::Failed);
    }

    #[tokio::test]
    async fn resolution_updates_canonical_and_aliases() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();

        fetcher.expect_fetch().times(1).returning(|_| {
            Ok(probe(
                301,
                Some("http://www.readability.com/read?url=http%3A%2F%2Forigin.example%2Farticle"),
            ))
        });

        let current = readability_record(5);
        repo.expect_find_by_id()
            .withf(|id| *id == 5)
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));

        repo.expect_update_alias_set()
            .withf(|id, patch| {
                *id == 5
                    && patch.set_canonical_url.as_deref() == Some("http://origin.example/article")
                    && patch
                        .add_aliases
                        .contains(&"http://origin.example/article".to_string())
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(5)).await;

        assert_eq!(
            outcome,
            ReconcileOutcome::Resolved {
                canonical_url: "http://origin.example/article".to_string()
            }
        );
    }

    #[tokio::test]
    async fn found_status_also_resolves() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();

        fetcher.expect_fetch().times(1).returning(|_| {
            Ok(probe(
                302,
                Some("http://www.readability.com/read?url=http%3A%2F%2Forigin.example%2F"),
            ))
        });

        let current = readability_record(2);
        repo.expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        repo.expect_update_alias_set().times(1).returning(|_, _| Ok(()));

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(2)).await;

        assert!(matches!(outcome, ReconcileOutcome::Resolved { .. }));
    }

    #[tokio::test]
    async fn vanished_record_fails() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();

        fetcher.expect_fetch().times(1).returning(|_| {
            Ok(probe(
                301,
                Some("http://www.readability.com/read?url=http%3A%2F%2Forigin.example%2F"),
            ))
        });

        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        repo.expect_update_alias_set().times(0);

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(9)).await;

        assert_eq!(outcome, ReconcileOutcome::Failed);
    }

    #[tokio::test]
    async fn persistence_error_is_swallowed() {
        let mut repo = MockContentRepository::new();
        let mut fetcher = MockRedirectFetcher::new();

        fetcher.expect_fetch().times(1).returning(|_| {
            Ok(probe(
                301,
                Some("http://www.readability.com/read?url=http%3A%2F%2Forigin.example%2F"),
            ))
        });

        let current = readability_record(3);
        repo.expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        repo.expect_update_alias_set()
            .times(1)
            .returning(|_, _| Err(crate::error::AppError::internal("db down", json!({}))));

        let service = RedirectService::new(Arc::new(repo), Arc::new(fetcher));
        let outcome = service.reconcile(&readability_record(3)).await;

        // Fire-and-forget save: the pass still counts as resolved.
        assert!(matches!(outcome, ReconcileOutcome::Resolved { .. }));
    }
}
