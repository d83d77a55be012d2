//! Mock catalog provider for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::catalog::{CatalogEntry, CatalogError, CatalogProvider};

/// Mock implementation of the CatalogProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return a configurable catalog
/// - Count how many times the catalog was fetched
/// - Simulate failures and slow fetches
///
/// # Example
///
/// ```rust,ignore
/// use steamgames_core::testing::{MockCatalogProvider, fixtures};
///
/// let provider = Arc::new(MockCatalogProvider::with_entries(fixtures::catalog()));
/// let cache = CatalogSearchCache::new(provider.clone(), ttl, 5);
///
/// cache.search(Some("portal"), 5).await?;
/// assert_eq!(provider.call_count(), 1);
/// ```
pub struct MockCatalogProvider {
    /// Catalog returned on success.
    entries: Arc<RwLock<Vec<CatalogEntry>>>,
    /// Number of list_all_entries calls, including failed ones.
    calls: AtomicUsize,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
    /// Simulated fetch latency.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl std::fmt::Debug for MockCatalogProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockCatalogProvider")
            .field("calls", &self.call_count())
            .finish_non_exhaustive()
    }
}

impl Default for MockCatalogProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalogProvider {
    /// Create a provider with an empty catalog.
    pub fn new() -> Self {
        Self::with_entries(Vec::new())
    }

    /// Create a provider returning the given catalog.
    pub fn with_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(entries)),
            calls: AtomicUsize::new(0),
            next_error: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the catalog returned by subsequent calls.
    pub async fn set_entries(&self, entries: Vec<CatalogEntry>) {
        *self.entries.write().await = entries;
    }

    /// Make the next call fail.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Delay every call by `delay`.
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    /// How many times the catalog was requested.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogProvider for MockCatalogProvider {
    async fn list_all_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(self.entries.read().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_returns_entries_and_counts_calls() {
        let provider = MockCatalogProvider::with_entries(fixtures::catalog());

        let entries = provider.list_all_entries().await.unwrap();
        assert_eq!(entries.len(), fixtures::catalog().len());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_next_error_fires_once() {
        let provider = MockCatalogProvider::with_entries(fixtures::catalog());
        provider
            .set_next_error(CatalogError::UpstreamUnavailable("down".into()))
            .await;

        assert!(provider.list_all_entries().await.is_err());
        assert!(provider.list_all_entries().await.is_ok());
        assert_eq!(provider.call_count(), 2);
    }
}
