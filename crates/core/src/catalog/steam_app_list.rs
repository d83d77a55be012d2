//! Catalog provider backed by the Steam Web API app list.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::types::{CatalogEntry, CatalogError};
use super::CatalogProvider;
use crate::http::HttpGet;
use crate::metrics;

const APP_LIST_PATH: &str = "/ISteamApps/GetAppList/v2/";

#[derive(Debug, Deserialize)]
struct AppListResponse {
    #[serde(default)]
    applist: Option<AppList>,
}

#[derive(Debug, Deserialize)]
struct AppList {
    #[serde(default)]
    apps: Vec<RawApp>,
}

#[derive(Debug, Deserialize)]
struct RawApp {
    appid: Option<u64>,
    name: Option<String>,
}

/// Fetches the whole `(appid, name)` catalog in one request.
pub struct SteamAppListClient {
    http: Arc<dyn HttpGet>,
    base_url: String,
}

impl SteamAppListClient {
    pub fn new(http: Arc<dyn HttpGet>, web_api_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: web_api_url.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), APP_LIST_PATH)
    }
}

/// Parse a `GetAppList` body. Entries without an id or name are skipped.
pub(crate) fn parse_app_list(body: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let response: AppListResponse = serde_json::from_str(body)
        .map_err(|e| CatalogError::UpstreamUnavailable(format!("invalid app list: {e}")))?;

    let apps = response.applist.map(|list| list.apps).unwrap_or_default();
    Ok(apps
        .into_iter()
        .filter_map(|app| {
            let id = u32::try_from(app.appid?).ok()?;
            Some(CatalogEntry::new(id, app.name?))
        })
        .collect())
}

#[async_trait]
impl CatalogProvider for SteamAppListClient {
    async fn list_all_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        let url = self.url();
        let start = Instant::now();

        let body = self
            .http
            .get(&url)
            .await
            .map_err(|e| CatalogError::UpstreamUnavailable(e.to_string()))?;

        metrics::UPSTREAM_DURATION
            .with_label_values(&["steam_web_api", "get_app_list"])
            .observe(start.elapsed().as_secs_f64());

        let entries = parse_app_list(&body)?;
        debug!(entries = entries.len(), "Fetched Steam app list");
        Ok(entries)
    }
}
