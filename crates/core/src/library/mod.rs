//! A Steam user's game library: owned and recently played games.

mod steam_web_api;

pub use steam_web_api::SteamLibraryClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::TransportError;

/// A game in a user's library. Playtimes are in minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub appid: u32,
    pub name: String,
    pub playtime_forever: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_2weeks: Option<u64>,
}

impl Game {
    pub fn new(appid: u32, name: impl Into<String>, playtime_forever: u64) -> Self {
        Self {
            appid,
            name: name.into(),
            playtime_forever,
            playtime_2weeks: None,
        }
    }

    pub fn with_recent_playtime(mut self, minutes: u64) -> Self {
        self.playtime_2weeks = Some(minutes);
        self
    }
}

/// Errors from library lookups.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("Steam Web API request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("invalid Steam Web API response: {0}")]
    InvalidResponse(String),
}

/// Per-user library queries.
#[async_trait]
pub trait GameLibrary: Send + Sync {
    /// All games owned by `steam_id`, including played free games.
    async fn owned_games(&self, steam_id: &str) -> Result<Vec<Game>, LibraryError>;

    /// Games played by `steam_id` in the last two weeks.
    async fn recent_games(&self, steam_id: &str) -> Result<Vec<Game>, LibraryError>;
}
