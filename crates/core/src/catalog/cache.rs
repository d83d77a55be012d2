//! Lazily refreshed, in-memory app catalog with fuzzy name search.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::scoring::score_normalized;
use super::types::{CacheStatus, CatalogEntry, CatalogError, SearchResult};
use super::CatalogProvider;
use crate::metrics;

/// One complete catalog fetch. Entries and timestamps are published together.
struct Snapshot {
    entries: Vec<CatalogEntry>,
    /// Trimmed lower-case names, index-aligned with `entries`.
    normalized: Vec<String>,
    refreshed_at: Instant,
    refreshed_at_wall: DateTime<Utc>,
}

impl Snapshot {
    fn new(entries: Vec<CatalogEntry>) -> Self {
        let normalized = entries
            .iter()
            .map(|e| e.name.trim().to_lowercase())
            .collect();
        Self {
            entries,
            normalized,
            refreshed_at: Instant::now(),
            refreshed_at_wall: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        Instant::now().duration_since(self.refreshed_at) > ttl
    }
}

/// Search cache over the full Steam app catalog.
///
/// The catalog is fetched on first use and again once it is older than the
/// TTL. At most one refresh runs at a time; callers that find the cache stale
/// while another refresh is running wait for it and reuse its result.
pub struct CatalogSearchCache {
    provider: Arc<dyn CatalogProvider>,
    ttl: Duration,
    default_limit: usize,
    state: RwLock<Option<Arc<Snapshot>>>,
    refresh_lock: Mutex<()>,
}

impl CatalogSearchCache {
    pub fn new(provider: Arc<dyn CatalogProvider>, ttl: Duration, default_limit: usize) -> Self {
        Self {
            provider,
            ttl,
            default_limit: default_limit.max(1),
            state: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Rank catalog entries against `query`.
    ///
    /// A blank or absent query returns nothing without touching the provider.
    /// `limit <= 0` falls back to the configured default.
    pub async fn search(
        &self,
        query: Option<&str>,
        limit: i64,
    ) -> Result<Vec<SearchResult>, CatalogError> {
        let query = match query.map(str::trim) {
            Some(q) if !q.is_empty() => q.to_lowercase(),
            _ => return Ok(Vec::new()),
        };

        let snapshot = self.fresh_snapshot().await?;
        let limit = self.effective_limit(limit);

        let mut results: Vec<SearchResult> = snapshot
            .entries
            .iter()
            .zip(&snapshot.normalized)
            .filter_map(|(entry, name)| {
                let score = score_normalized(&query, name);
                (score > 0.0).then(|| SearchResult {
                    id: entry.id,
                    name: entry.name.clone(),
                    score,
                })
            })
            .collect();

        // sort_by is stable: equal scores keep catalog order
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);

        metrics::SEARCHES_TOTAL.inc();
        metrics::SEARCH_RESULTS.observe(results.len() as f64);
        debug!(query = %query, limit, results = results.len(), "Catalog search");

        Ok(results)
    }

    /// Refresh the catalog if it is absent or older than the TTL.
    pub async fn ensure_fresh(&self) -> Result<(), CatalogError> {
        self.fresh_snapshot().await.map(|_| ())
    }

    /// Human-readable cache summary. Never triggers a refresh.
    pub fn cache_info(&self) -> String {
        match self.current() {
            None => "Cache not loaded".to_string(),
            Some(snapshot) => format!(
                "Cache loaded: {} apps, last fetch: {}, expired: {}",
                snapshot.entries.len(),
                snapshot.refreshed_at_wall.to_rfc3339(),
                snapshot.is_stale(self.ttl)
            ),
        }
    }

    /// Structured cache summary. Never triggers a refresh.
    pub fn cache_status(&self) -> CacheStatus {
        let ttl_secs = self.ttl.as_secs();
        match self.current() {
            None => CacheStatus {
                loaded: false,
                entries: 0,
                last_refreshed_at: None,
                age_secs: None,
                ttl_secs,
                stale: true,
            },
            Some(snapshot) => CacheStatus {
                loaded: true,
                entries: snapshot.entries.len(),
                last_refreshed_at: Some(snapshot.refreshed_at_wall),
                age_secs: Some(
                    Instant::now()
                        .duration_since(snapshot.refreshed_at)
                        .as_secs(),
                ),
                ttl_secs,
                stale: snapshot.is_stale(self.ttl),
            },
        }
    }

    fn effective_limit(&self, limit: i64) -> usize {
        if limit <= 0 {
            self.default_limit
        } else {
            usize::try_from(limit).unwrap_or(usize::MAX)
        }
    }

    fn current(&self) -> Option<Arc<Snapshot>> {
        self.state
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn fresh(&self) -> Option<Arc<Snapshot>> {
        self.current().filter(|s| !s.is_stale(self.ttl))
    }

    async fn fresh_snapshot(&self) -> Result<Arc<Snapshot>, CatalogError> {
        if let Some(snapshot) = self.fresh() {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let Some(snapshot) = self.fresh() {
            return Ok(snapshot);
        }

        self.refresh().await
    }

    async fn refresh(&self) -> Result<Arc<Snapshot>, CatalogError> {
        let start = Instant::now();
        let entries = match self.provider.list_all_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                metrics::CATALOG_REFRESHES
                    .with_label_values(&["failed"])
                    .inc();
                warn!(error = %e, "Catalog refresh failed, keeping previous state");
                return Err(e);
            }
        };

        let snapshot = Arc::new(Snapshot::new(entries));
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = Some(Arc::clone(&snapshot));

        metrics::CATALOG_REFRESHES
            .with_label_values(&["success"])
            .inc();
        metrics::CATALOG_ENTRIES.set(snapshot.entries.len() as i64);
        info!(
            entries = snapshot.entries.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Catalog refreshed"
        );

        Ok(snapshot)
    }
}
