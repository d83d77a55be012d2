//! Catalog and store integration tests.
//!
//! These tests wire the real Steam clients, search cache and detail fetcher
//! over a mock HTTP client:
//! - App list refresh, TTL expiry and refresh failures
//! - Batch store detail fetches with mixed outcomes

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use steamgames_core::{
    parse_app_ids,
    testing::{fixtures, MockHttpClient},
    CatalogSearchCache, ParallelDetailFetcher, SteamAppListClient, TransportError,
};

const WEB_API: &str = "https://api.test";
const APP_LIST_URL: &str = "https://api.test/ISteamApps/GetAppList/v2/";
const STORE: &str = "https://store.test/api/appdetails";

fn app_list(apps: &[(u32, &str)]) -> String {
    let apps: Vec<_> = apps
        .iter()
        .map(|(id, name)| json!({"appid": id, "name": name}))
        .collect();
    json!({"applist": {"apps": apps}}).to_string()
}

fn cache_over(http: &Arc<MockHttpClient>, ttl: Duration) -> CatalogSearchCache {
    let provider = Arc::new(SteamAppListClient::new(http.clone(), WEB_API));
    CatalogSearchCache::new(provider, ttl, 5)
}

#[tokio::test(start_paused = true)]
async fn test_app_list_refreshes_after_ttl() {
    let http = Arc::new(MockHttpClient::new());
    http.set_response(
        APP_LIST_URL,
        &app_list(&[(220, "Half-Life 2"), (70, "Half-Life"), (400, "Portal")]),
    )
    .await;
    let cache = cache_over(&http, Duration::from_secs(60));

    let results = assert_ok!(cache.search(Some("half-life"), 0).await);
    assert_eq!(results[0].id, 70);
    assert_eq!(results[0].score, 1.0);
    assert_eq!(results[1].id, 220);

    // A new app appears upstream but the snapshot is still fresh
    http.set_response(
        APP_LIST_URL,
        &app_list(&[(220, "Half-Life 2"), (70, "Half-Life"), (546560, "Half-Life: Alyx")]),
    )
    .await;
    let results = assert_ok!(cache.search(Some("alyx"), 0).await);
    assert!(results.is_empty());
    assert_eq!(http.requested_urls().await.len(), 1);

    tokio::time::advance(Duration::from_secs(61)).await;

    let results = assert_ok!(cache.search(Some("alyx"), 0).await);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, 546560);
    assert_eq!(http.requested_urls().await.len(), 2);
}

#[tokio::test]
async fn test_app_list_failure_leaves_cache_empty() {
    let http = Arc::new(MockHttpClient::new());
    http.set_error(
        APP_LIST_URL,
        TransportError::Status {
            status: 503,
            body: "Service Unavailable".into(),
        },
    )
    .await;
    let cache = cache_over(&http, Duration::from_secs(60));

    let err = assert_err!(cache.search(Some("portal"), 3).await);
    assert!(err.to_string().contains("HTTP 503"));
    assert_eq!(cache.cache_info(), "Cache not loaded");
    assert!(!cache.cache_status().loaded);

    http.set_response(APP_LIST_URL, &app_list(&[(400, "Portal")]))
        .await;
    let results = assert_ok!(cache.search(Some("portal"), 3).await);
    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_batch_details_with_mixed_outcomes() {
    let http = Arc::new(MockHttpClient::new());
    http.set_response(
        &format!("{STORE}?appids=440"),
        &fixtures::complete_detail_body(440),
    )
    .await;
    http.set_response(
        &format!("{STORE}?appids=620"),
        &fixtures::detail_body(620, "Portal 2"),
    )
    .await;

    let ids = assert_ok!(parse_app_ids(Some(&json!([440, 620, 440, 7]))));
    let fetcher = ParallelDetailFetcher::new(http.clone(), STORE);
    let records = fetcher.fetch_all(&ids, None, None).await;

    assert_eq!(records.len(), 3);
    assert_eq!(http.requested_urls().await.len(), 3);

    let tf2 = records.iter().find(|r| r.app_id == 440).unwrap();
    assert!(tf2.success);
    assert!(tf2.is_free);
    assert!(tf2.pc_requirements.is_some());

    let portal = records.iter().find(|r| r.app_id == 620).unwrap();
    assert!(portal.success);
    assert_eq!(portal.name, "Portal 2");
    assert!(portal.price_overview.is_none());

    let missing = records.iter().find(|r| r.app_id == 7).unwrap();
    assert!(!missing.success);
    assert!(missing.name.contains("HTTP 404"));
}

#[tokio::test]
async fn test_invalid_ids_rejected_before_fetch() {
    assert_err!(parse_app_ids(Some(&json!([440, 1.5]))));
    assert_err!(parse_app_ids(Some(&json!("440"))));
    assert_err!(parse_app_ids(None));
}
