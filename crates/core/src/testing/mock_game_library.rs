//! Mock game library for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::library::{Game, GameLibrary, LibraryError};

/// Mock implementation of the GameLibrary trait.
///
/// Returns the configured owned/recent lists for any steam id and records
/// which ids were asked for.
pub struct MockGameLibrary {
    owned: Arc<RwLock<Vec<Game>>>,
    recent: Arc<RwLock<Vec<Game>>>,
    /// Steam ids passed to either query, in call order.
    lookups: Arc<RwLock<Vec<String>>>,
    /// If set, the next query will fail with this error.
    next_error: Arc<RwLock<Option<LibraryError>>>,
}

impl std::fmt::Debug for MockGameLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockGameLibrary").finish_non_exhaustive()
    }
}

impl Default for MockGameLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGameLibrary {
    pub fn new() -> Self {
        Self {
            owned: Arc::new(RwLock::new(Vec::new())),
            recent: Arc::new(RwLock::new(Vec::new())),
            lookups: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn set_owned(&self, games: Vec<Game>) {
        *self.owned.write().await = games;
    }

    pub async fn set_recent(&self, games: Vec<Game>) {
        *self.recent.write().await = games;
    }

    pub async fn set_next_error(&self, error: LibraryError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn lookups(&self) -> Vec<String> {
        self.lookups.read().await.clone()
    }

    async fn record(&self, steam_id: &str) -> Result<(), LibraryError> {
        self.lookups.write().await.push(steam_id.to_string());
        match self.next_error.write().await.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GameLibrary for MockGameLibrary {
    async fn owned_games(&self, steam_id: &str) -> Result<Vec<Game>, LibraryError> {
        self.record(steam_id).await?;
        Ok(self.owned.read().await.clone())
    }

    async fn recent_games(&self, steam_id: &str) -> Result<Vec<Game>, LibraryError> {
        self.record(steam_id).await?;
        Ok(self.recent.read().await.clone())
    }
}
