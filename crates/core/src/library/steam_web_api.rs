//! `IPlayerService` client for the Steam Web API.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{Game, GameLibrary, LibraryError};
use crate::http::{with_query, HttpGet};
use crate::metrics;

const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v1/";
const RECENT_GAMES_PATH: &str = "/IPlayerService/GetRecentlyPlayedGames/v1/";

#[derive(Debug, Deserialize)]
struct PlayerServiceResponse {
    #[serde(default)]
    response: Option<GamesPayload>,
}

#[derive(Debug, Deserialize)]
struct GamesPayload {
    #[serde(default)]
    games: Option<Vec<RawGame>>,
}

#[derive(Debug, Deserialize)]
struct RawGame {
    appid: u32,
    #[serde(default)]
    name: String,
    #[serde(default)]
    playtime_forever: u64,
    #[serde(default)]
    playtime_2weeks: Option<u64>,
}

/// Reads owned and recently played games with a Web API key.
pub struct SteamLibraryClient {
    http: Arc<dyn HttpGet>,
    base_url: String,
    api_key: String,
}

impl SteamLibraryClient {
    pub fn new(
        http: Arc<dyn HttpGet>,
        web_api_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: web_api_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn fetch_games(
        &self,
        path: &str,
        operation: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<RawGame>, LibraryError> {
        let base = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let mut query = vec![("key", self.api_key.as_str()), ("format", "json")];
        query.extend_from_slice(params);
        let url = with_query(&base, &query);

        let start = Instant::now();
        let body = self.http.get(&url).await?;
        metrics::UPSTREAM_DURATION
            .with_label_values(&["steam_web_api", operation])
            .observe(start.elapsed().as_secs_f64());

        let games = parse_games(&body)?;
        debug!(operation, games = games.len(), "Fetched library games");
        Ok(games)
    }
}

/// Missing `response` or `games` means the user has none (or a private profile).
fn parse_games(body: &str) -> Result<Vec<RawGame>, LibraryError> {
    let parsed: PlayerServiceResponse =
        serde_json::from_str(body).map_err(|e| LibraryError::InvalidResponse(e.to_string()))?;
    Ok(parsed
        .response
        .and_then(|r| r.games)
        .unwrap_or_default())
}

#[async_trait]
impl GameLibrary for SteamLibraryClient {
    async fn owned_games(&self, steam_id: &str) -> Result<Vec<Game>, LibraryError> {
        let games = self
            .fetch_games(
                OWNED_GAMES_PATH,
                "get_owned_games",
                &[
                    ("steamid", steam_id),
                    ("include_appinfo", "true"),
                    ("include_played_free_games", "true"),
                ],
            )
            .await?;

        Ok(games
            .into_iter()
            .map(|g| Game::new(g.appid, g.name, g.playtime_forever))
            .collect())
    }

    async fn recent_games(&self, steam_id: &str) -> Result<Vec<Game>, LibraryError> {
        let games = self
            .fetch_games(
                RECENT_GAMES_PATH,
                "get_recently_played_games",
                &[("steamid", steam_id)],
            )
            .await?;

        Ok(games
            .into_iter()
            .map(|g| Game {
                appid: g.appid,
                name: g.name,
                playtime_forever: g.playtime_forever,
                playtime_2weeks: g.playtime_2weeks,
            })
            .collect())
    }
}
