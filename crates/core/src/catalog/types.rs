//! Types for the app catalog and its search cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One application from the Steam catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Steam app ID.
    pub id: u32,
    /// Display name as published by Steam.
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A ranked match for a name query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "app_id")]
    pub id: u32,
    pub name: String,
    /// Relevance in (0.0, 1.0]; 1.0 is an exact (case-insensitive) match.
    pub score: f64,
}

/// Point-in-time view of the search cache, for diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatus {
    pub loaded: bool,
    pub entries: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_refreshed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_secs: Option<u64>,
    pub ttl_secs: u64,
    pub stale: bool,
}

/// Errors from the catalog layer.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog could not be fetched or parsed; no stale data is substituted.
    #[error("Steam app catalog unavailable: {0}")]
    UpstreamUnavailable(String),
}
