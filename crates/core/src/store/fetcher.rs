//! Concurrent per-app store detail retrieval.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use tracing::{debug, warn};

use super::parse::{parse_detail_response, DetailParseError};
use super::types::DetailRecord;
use crate::http::{with_query, HttpGet};
use crate::metrics;

/// Fetches store details for many apps at once.
///
/// Every requested id yields exactly one [`DetailRecord`]. A failed request
/// or unparseable body becomes a `success=false` record for that id only;
/// the batch itself cannot fail.
pub struct ParallelDetailFetcher {
    http: Arc<dyn HttpGet>,
    base_url: String,
}

impl ParallelDetailFetcher {
    pub fn new(http: Arc<dyn HttpGet>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetch details for each id concurrently.
    ///
    /// `region` is a country code (`cc`) for pricing, `locale` a language
    /// (`l`) for descriptions. Duplicate ids are fetched once. Results come
    /// back in first-seen id order.
    pub async fn fetch_all(
        &self,
        ids: &[u32],
        region: Option<&str>,
        locale: Option<&str>,
    ) -> Vec<DetailRecord> {
        if ids.is_empty() {
            return Vec::new();
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let unique: Vec<u32> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let region = region.map(str::trim).filter(|s| !s.is_empty());
        let locale = locale.map(str::trim).filter(|s| !s.is_empty());

        let start = Instant::now();
        let records = join_all(
            unique
                .iter()
                .map(|&id| self.fetch_one(id, region, locale)),
        )
        .await;

        let failed = records.iter().filter(|r| !r.success).count();
        debug!(
            requested = unique.len(),
            failed,
            duration_ms = start.elapsed().as_millis() as u64,
            "Store detail batch complete"
        );

        records
    }

    fn url(&self, app_id: u32, region: Option<&str>, locale: Option<&str>) -> String {
        let id = app_id.to_string();
        let mut params = vec![("appids", id.as_str())];
        if let Some(cc) = region {
            params.push(("cc", cc));
        }
        if let Some(l) = locale {
            params.push(("l", l));
        }
        with_query(&self.base_url, &params)
    }

    async fn fetch_one(
        &self,
        app_id: u32,
        region: Option<&str>,
        locale: Option<&str>,
    ) -> DetailRecord {
        let url = self.url(app_id, region, locale);
        let start = Instant::now();
        let response = self.http.get(&url).await;

        metrics::UPSTREAM_DURATION
            .with_label_values(&["steam_store", "app_details"])
            .observe(start.elapsed().as_secs_f64());

        let body = match response {
            Ok(body) => body,
            Err(e) => {
                metrics::DETAIL_FETCHES
                    .with_label_values(&["transport_error"])
                    .inc();
                warn!(app_id, error = %e, "Store detail request failed");
                return DetailRecord::failed(app_id, format!("HTTP request failed: {e}"));
            }
        };

        match parse_detail_response(app_id, &body) {
            Ok(record) => {
                metrics::DETAIL_FETCHES.with_label_values(&["success"]).inc();
                record
            }
            Err(e) => {
                let label = match e {
                    DetailParseError::Rejected => "rejected",
                    DetailParseError::Malformed(_) => "parse_error",
                };
                metrics::DETAIL_FETCHES.with_label_values(&[label]).inc();
                warn!(app_id, error = %e, "Store detail response unusable");
                DetailRecord::failed(app_id, e.to_string())
            }
        }
    }
}
