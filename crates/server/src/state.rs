use std::sync::Arc;

use steamgames_core::{
    CatalogProvider, CatalogSearchCache, Config, GameLibrary, HttpGet, ParallelDetailFetcher,
    SanitizedConfig,
};

use crate::mcp::ToolRegistry;

/// Shared application state
pub struct AppState {
    config: Config,
    cache: CatalogSearchCache,
    fetcher: ParallelDetailFetcher,
    library: Arc<dyn GameLibrary>,
    tools: ToolRegistry,
}

impl AppState {
    /// Wire the search cache and detail fetcher from config and the given backends.
    pub fn new(
        config: Config,
        catalog: Arc<dyn CatalogProvider>,
        store_http: Arc<dyn HttpGet>,
        library: Arc<dyn GameLibrary>,
    ) -> Self {
        let cache = CatalogSearchCache::new(
            catalog,
            config.search.cache_ttl(),
            config.search.default_limit,
        );
        let fetcher = ParallelDetailFetcher::new(store_http, config.store.base_url.clone());
        let tools = ToolRegistry::new(&config.tools.prefix);

        Self {
            config,
            cache,
            fetcher,
            library,
            tools,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn cache(&self) -> &CatalogSearchCache {
        &self.cache
    }

    pub fn fetcher(&self) -> &ParallelDetailFetcher {
        &self.fetcher
    }

    pub fn library(&self) -> &dyn GameLibrary {
        self.library.as_ref()
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}
