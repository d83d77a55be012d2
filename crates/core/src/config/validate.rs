use super::{
    types::{Config, Transport},
    ConfigError,
};

/// Steam vanity URLs are capped at 32 characters; SteamID64 values are 17 digits.
const MAX_STEAM_ID_LEN: usize = 32;

/// Validate configuration
/// Currently validates:
/// - Steam API key and Steam ID are not blank
/// - Steam ID is at most 32 characters
/// - Search and store numeric settings are non-zero
/// - Server port is not 0 when serving over HTTP
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.steam.api_key.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "steam.api_key (STEAM_API_KEY) cannot be blank".to_string(),
        ));
    }

    let steam_id = config.steam.steam_id.trim();
    if steam_id.is_empty() {
        return Err(ConfigError::ValidationError(
            "steam.steam_id (STEAM_ID) cannot be blank".to_string(),
        ));
    }
    if steam_id.chars().count() > MAX_STEAM_ID_LEN {
        return Err(ConfigError::ValidationError(format!(
            "steam.steam_id must be at most {} characters",
            MAX_STEAM_ID_LEN
        )));
    }

    if config.search.cache_ttl_secs == 0 {
        return Err(ConfigError::ValidationError(
            "search.cache_ttl_secs cannot be 0".to_string(),
        ));
    }
    if config.search.default_limit == 0 {
        return Err(ConfigError::ValidationError(
            "search.default_limit cannot be 0".to_string(),
        ));
    }
    if config.store.connect_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "store.connect_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.server.transport == Transport::Http && config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    Ok(())
}
