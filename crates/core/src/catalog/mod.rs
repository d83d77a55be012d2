//! Steam app catalog search.
//!
//! Keeps an in-memory snapshot of the full `(appid, name)` list, refreshes it
//! from a [`CatalogProvider`] once the snapshot outlives its TTL, and answers
//! fuzzy name queries against it.

mod cache;
mod scoring;
mod steam_app_list;
mod types;

pub use cache::CatalogSearchCache;
pub use scoring::{levenshtein_distance, score, SIMILARITY_FLOOR, SUBSTRING_SCORE};
pub use steam_app_list::SteamAppListClient;
pub use types::*;

use async_trait::async_trait;

/// Source of the complete application catalog.
///
/// One call returns every entry; there is no pagination. Implementations map
/// any transport or parsing problem to [`CatalogError::UpstreamUnavailable`].
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn list_all_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}
