pub mod catalog;
pub mod config;
pub mod http;
pub mod library;
pub mod metrics;
pub mod store;
pub mod testing;

pub use catalog::{
    CacheStatus, CatalogEntry, CatalogError, CatalogProvider, CatalogSearchCache, SearchResult,
    SteamAppListClient,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    Transport,
};
pub use http::{HttpGet, ReqwestHttpClient, TransportError};
pub use library::{Game, GameLibrary, LibraryError, SteamLibraryClient};
pub use store::{parse_app_ids, DetailRecord, ParallelDetailFetcher, StoreError};
