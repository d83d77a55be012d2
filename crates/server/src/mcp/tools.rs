//! Tool catalog and handlers.

use std::time::Instant;

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use steamgames_core::parse_app_ids;

use super::protocol::{CallToolResult, ToolDefinition};
use crate::metrics::{TOOL_CALLS_TOTAL, TOOL_CALL_DURATION};
use crate::state::AppState;

/// The tools this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    GetGames,
    GetRecentGames,
    GetStoreDetails,
    SearchApps,
    GetSearchCacheInfo,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        ToolKind::GetGames,
        ToolKind::GetRecentGames,
        ToolKind::GetStoreDetails,
        ToolKind::SearchApps,
        ToolKind::GetSearchCacheInfo,
    ];

    /// Name without the configured prefix.
    pub fn base_name(self) -> &'static str {
        match self {
            ToolKind::GetGames => "get-games",
            ToolKind::GetRecentGames => "get-recent-games",
            ToolKind::GetStoreDetails => "get-store-details",
            ToolKind::SearchApps => "search-apps",
            ToolKind::GetSearchCacheInfo => "get-search-cache-info",
        }
    }

    fn description(self) -> &'static str {
        match self {
            ToolKind::GetGames => {
                "List every game owned by the configured Steam user, installed or not, \
                 free or purchased, with total playtime. Data comes from the Steam Web API. \
                 NOTE: playtime is in minutes."
            }
            ToolKind::GetRecentGames => {
                "List the games the configured Steam user played in the last two weeks, \
                 with total and two-week playtime. Data comes from the Steam Web API. \
                 NOTE: playtime is in minutes."
            }
            ToolKind::GetStoreDetails => {
                "Fetch Steam Store details for one or more app IDs: descriptions, pricing, \
                 platforms, screenshots, videos, categories, genres, system requirements, \
                 metacritic score, developers, publishers and release date. Optionally pass a \
                 country code for regional pricing and a language for localized text. The \
                 store API needs no key but is rate-limited to 200 requests per 5 minutes. \
                 Apps that cannot be fetched are returned with success=false and a reason."
            }
            ToolKind::SearchApps => {
                "Search the full Steam app catalog by name. Matching is case-insensitive and \
                 fuzzy: exact names score 1.0, names containing the query 0.9, and close \
                 spellings by edit distance. Use it to find app IDs for get-store-details. \
                 The catalog is cached for 24 hours."
            }
            ToolKind::GetSearchCacheInfo => {
                "Report whether the app catalog used by search-apps is loaded, how many apps \
                 it holds, when it was last fetched and whether it has expired."
            }
        }
    }

    fn input_schema(self) -> Value {
        match self {
            ToolKind::GetGames | ToolKind::GetRecentGames | ToolKind::GetSearchCacheInfo => {
                json!({ "type": "object", "properties": {} })
            }
            ToolKind::GetStoreDetails => json!({
                "type": "object",
                "properties": {
                    "appIds": {
                        "type": "array",
                        "items": { "type": "integer" },
                        "description": "Steam App IDs to fetch store details for"
                    },
                    "countryCode": {
                        "type": "string",
                        "description": "Optional ISO 3166-1 country code for regional pricing (e.g. 'US', 'GB', 'DE')"
                    },
                    "language": {
                        "type": "string",
                        "description": "Optional language for localized descriptions (e.g. 'english', 'german')"
                    }
                },
                "required": ["appIds"]
            }),
            ToolKind::SearchApps => json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "App name or part of it"
                    },
                    "limit": {
                        "type": "integer",
                        "description": "Maximum number of results (default 5)"
                    }
                },
                "required": ["query"]
            }),
        }
    }
}

/// Tool names as exposed to clients, with the configured prefix applied.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    prefix: String,
}

impl ToolRegistry {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub fn name(&self, kind: ToolKind) -> String {
        format!("{}{}", self.prefix, kind.base_name())
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        ToolKind::ALL
            .iter()
            .map(|&kind| ToolDefinition {
                name: self.name(kind),
                description: kind.description().to_string(),
                input_schema: kind.input_schema(),
            })
            .collect()
    }

    pub fn resolve(&self, name: &str) -> Option<ToolKind> {
        let base = name.strip_prefix(self.prefix.as_str())?;
        ToolKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.base_name() == base)
    }
}

/// Run one tool. Every failure is reported inside the result.
pub async fn call_tool(state: &AppState, kind: ToolKind, args: &Map<String, Value>) -> CallToolResult {
    let start = Instant::now();

    let result = match kind {
        ToolKind::GetGames => get_games(state).await,
        ToolKind::GetRecentGames => get_recent_games(state).await,
        ToolKind::GetStoreDetails => get_store_details(state, args).await,
        ToolKind::SearchApps => search_apps(state, args).await,
        ToolKind::GetSearchCacheInfo => CallToolResult::text(state.cache().cache_info()),
    };

    let tool = kind.base_name();
    let outcome = if result.is_error { "error" } else { "ok" };
    TOOL_CALLS_TOTAL.with_label_values(&[tool, outcome]).inc();
    TOOL_CALL_DURATION
        .with_label_values(&[tool])
        .observe(start.elapsed().as_secs_f64());
    debug!(tool, outcome, duration_ms = start.elapsed().as_millis() as u64, "Tool call");

    result
}

fn failure(error: &str, message: impl ToString) -> CallToolResult {
    CallToolResult::error(&json!({ "error": error, "message": message.to_string() }))
}

fn rejection(error: impl ToString) -> CallToolResult {
    CallToolResult::error(&json!({ "error": error.to_string() }))
}

async fn get_games(state: &AppState) -> CallToolResult {
    let steam_id = &state.config().steam.steam_id;
    match state.library().owned_games(steam_id).await {
        Ok(games) => CallToolResult::json(&json!({
            "owner": steam_id,
            "description": "Played games by the given steam id",
            "all_games": games,
        })),
        Err(e) => {
            warn!(error = %e, "get-games failed");
            failure("Failed to retrieve games from Steam API", e)
        }
    }
}

async fn get_recent_games(state: &AppState) -> CallToolResult {
    let steam_id = &state.config().steam.steam_id;
    match state.library().recent_games(steam_id).await {
        Ok(games) => CallToolResult::json(&json!({
            "owner": steam_id,
            "description": "Recently played games by the given steam id",
            "recent_games": games,
        })),
        Err(e) => {
            warn!(error = %e, "get-recent-games failed");
            failure("Failed to retrieve recent games from Steam API", e)
        }
    }
}

/// Optional string argument. `Err` names the argument when it has the wrong type.
fn optional_str<'a>(args: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(format!("{key} must be a string")),
    }
}

async fn get_store_details(state: &AppState, args: &Map<String, Value>) -> CallToolResult {
    let app_ids = match parse_app_ids(args.get("appIds")) {
        Ok(ids) => ids,
        Err(e) => return rejection(e),
    };

    let (country_code, language) =
        match (optional_str(args, "countryCode"), optional_str(args, "language")) {
            (Ok(cc), Ok(lang)) => (cc, lang),
            (Err(e), _) | (_, Err(e)) => return failure("Invalid parameter types", e),
        };

    let records = state
        .fetcher()
        .fetch_all(&app_ids, country_code, language)
        .await;

    let mut response = json!({
        "description": "Steam Store details for requested applications",
        "total_apps": records.len(),
        "store_details": records,
    });
    if let Some(cc) = country_code {
        response["country_code"] = json!(cc);
    }
    if let Some(lang) = language {
        response["language"] = json!(lang);
    }

    CallToolResult::json(&response)
}

async fn search_apps(state: &AppState, args: &Map<String, Value>) -> CallToolResult {
    let query = match optional_str(args, "query") {
        Ok(q) => q,
        Err(e) => return failure("Invalid parameter types", e),
    };

    let limit = match args.get("limit") {
        None | Some(Value::Null) => 0,
        Some(v) => match v.as_i64() {
            Some(n) => n,
            None => return failure("Invalid parameter types", "limit must be an integer"),
        },
    };

    match state.cache().search(query, limit).await {
        Ok(results) => CallToolResult::json(&json!({
            "query": query.unwrap_or_default(),
            "total_results": results.len(),
            "results": results,
        })),
        Err(e) => {
            warn!(error = %e, "search-apps failed");
            failure("Failed to search Steam apps", e)
        }
    }
}
