//! Testing utilities and mock implementations.
//!
//! Mocks for every external seam of the crate (catalog provider, HTTP
//! client, game library) plus canned Steam payloads, so the search cache,
//! detail fetcher and server can be tested without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use steamgames_core::testing::{MockCatalogProvider, MockHttpClient, fixtures};
//!
//! let provider = Arc::new(MockCatalogProvider::with_entries(fixtures::catalog()));
//! let http = Arc::new(MockHttpClient::new());
//! http.set_response(url, &fixtures::detail_body(440, "Team Fortress 2")).await;
//! ```

mod mock_catalog_provider;
mod mock_game_library;
mod mock_http_client;

pub use mock_catalog_provider::MockCatalogProvider;
pub use mock_game_library::MockGameLibrary;
pub use mock_http_client::MockHttpClient;

/// Test fixtures and helper functions.
pub mod fixtures {
    use serde_json::{json, Value};

    use crate::catalog::CatalogEntry;
    use crate::library::Game;

    /// A small catalog with a few overlapping names.
    pub fn catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new(10, "Counter-Strike"),
            CatalogEntry::new(240, "Counter-Strike: Source"),
            CatalogEntry::new(400, "Portal"),
            CatalogEntry::new(440, "Team Fortress 2"),
            CatalogEntry::new(570, "Dota 2"),
            CatalogEntry::new(620, "Portal 2"),
            CatalogEntry::new(220, "Half-Life 2"),
            CatalogEntry::new(317400, "Portal Stories: Mel"),
            CatalogEntry::new(413150, "Stardew Valley"),
            CatalogEntry::new(1145360, "Hades"),
        ]
    }

    /// Owned games for a test user.
    pub fn owned_games() -> Vec<Game> {
        vec![
            Game::new(440, "Team Fortress 2", 150),
            Game::new(620, "Portal 2", 840),
            Game::new(999, "Unplayed Game", 0),
        ]
    }

    /// Recently played games for a test user.
    pub fn recent_games() -> Vec<Game> {
        vec![Game::new(570, "Dota 2", 9000).with_recent_playtime(25)]
    }

    /// Wrap `data` in the store's `{"<id>": {"success": true, "data": ...}}` envelope.
    pub fn detail_envelope(app_id: u32, data: Value) -> String {
        let mut root = serde_json::Map::new();
        root.insert(
            app_id.to_string(),
            json!({ "success": true, "data": data }),
        );
        Value::Object(root).to_string()
    }

    /// Minimal successful `appdetails` body.
    pub fn detail_body(app_id: u32, name: &str) -> String {
        detail_envelope(
            app_id,
            json!({
                "type": "game",
                "name": name,
                "steam_appid": app_id,
                "required_age": 0,
                "is_free": false,
                "platforms": {"windows": true, "mac": false, "linux": false},
                "release_date": {"coming_soon": false, "date": "1 Nov, 2000"},
            }),
        )
    }

    /// `appdetails` body with every optional field populated.
    pub fn complete_detail_body(app_id: u32) -> String {
        detail_envelope(
            app_id,
            json!({
                "type": "game",
                "name": "Team Fortress 2",
                "steam_appid": app_id,
                "required_age": 0,
                "is_free": true,
                "controller_support": "full",
                "dlc": [123, 456, 789],
                "detailed_description": "Team Fortress 2 is a team-based multiplayer FPS.",
                "about_the_game": "Nine distinct classes provide a broad range of tactical abilities.",
                "short_description": "Team-based FPS game.",
                "price_overview": {
                    "currency": "EUR",
                    "initial": 1999,
                    "final": 999,
                    "discount_percent": 50,
                    "final_formatted": "9,99€"
                },
                "header_image": "https://cdn.example.com/apps/440/header.jpg",
                "screenshots": [
                    {
                        "id": 0,
                        "path_thumbnail": "https://cdn.example.com/apps/440/ss_thumb.jpg",
                        "path_full": "https://cdn.example.com/apps/440/ss_full.jpg"
                    }
                ],
                "movies": [
                    {
                        "id": 256698790,
                        "name": "Meet the Heavy",
                        "thumbnail": "https://cdn.example.com/apps/440/movie.jpg",
                        "webm": {"480": "https://cdn.example.com/480.webm", "max": "https://cdn.example.com/max.webm"},
                        "mp4": {"480": "https://cdn.example.com/480.mp4", "max": "https://cdn.example.com/max.mp4"}
                    }
                ],
                "categories": [
                    {"id": 1, "description": "Multi-player"},
                    {"id": 9, "description": "Co-op"}
                ],
                "genres": [{"id": "1", "description": "Action"}],
                "developers": ["Valve"],
                "publishers": ["Valve"],
                "supported_languages": "English, French, German",
                "platforms": {"windows": true, "mac": true, "linux": true},
                "pc_requirements": {
                    "minimum": "Minimum: CPU 1.7 GHz, RAM 512MB",
                    "recommended": "Recommended: CPU 3 GHz, RAM 1GB"
                },
                "mac_requirements": {"minimum": "OS X 10.5.8"},
                "linux_requirements": {"minimum": "Ubuntu 12.04"},
                "metacritic": {
                    "score": 92,
                    "url": "https://www.metacritic.com/game/pc/team-fortress-2"
                },
                "recommendations": {"total": 500000},
                "achievements": {
                    "total": 520,
                    "highlighted": [
                        {"name": "First Blood", "path": "https://cdn.example.com/achievement.jpg"}
                    ]
                },
                "release_date": {"coming_soon": false, "date": "10 Oct, 2007"},
                "website": "https://www.teamfortress.com/",
                "legal_notice": "© Valve Corporation"
            }),
        )
    }
}
