use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub steam: SteamConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Steam Web API credentials and endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SteamConfig {
    /// Steam Web API key
    pub api_key: String,
    /// SteamID64 or vanity name of the library owner
    pub steam_id: String,
    /// Base URL of the Steam Web API (default: https://api.steampowered.com)
    #[serde(default = "default_web_api_url")]
    pub web_api_url: String,
}

fn default_web_api_url() -> String {
    "https://api.steampowered.com".to_string()
}

/// Tool registration settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Prefix prepended to every tool name (e.g. "steam_")
    #[serde(default)]
    pub prefix: String,
}

/// App search cache settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// How long a catalog snapshot stays fresh (default: one day)
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Result count used when the caller passes no positive limit
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

impl SearchConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            cache_ttl_secs: default_cache_ttl_secs(),
            default_limit: default_limit(),
        }
    }
}

fn default_cache_ttl_secs() -> u64 {
    24 * 60 * 60
}

fn default_limit() -> usize {
    5
}

/// Steam Store API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// appdetails endpoint
    #[serde(default = "default_store_url")]
    pub base_url: String,
    /// Connect timeout in seconds (default: 30)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl StoreConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_store_url(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_store_url() -> String {
    "https://store.steampowered.com/api/appdetails".to_string()
}

fn default_connect_timeout() -> u64 {
    30
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub transport: Transport,
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: Transport::default(),
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([127, 0, 0, 1])
}

fn default_port() -> u16 {
    8080
}

/// How the tool protocol is exposed
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    /// Newline-delimited JSON-RPC on stdin/stdout
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST plus the diagnostic API
    Http,
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub steam: SanitizedSteamConfig,
    pub tools: ToolsConfig,
    pub search: SearchConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
}

/// Sanitized Steam config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedSteamConfig {
    pub api_key_configured: bool,
    pub steam_id: String,
    pub web_api_url: String,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            steam: SanitizedSteamConfig {
                api_key_configured: !config.steam.api_key.trim().is_empty(),
                steam_id: config.steam.steam_id.clone(),
                web_api_url: config.steam.web_api_url.clone(),
            },
            tools: config.tools.clone(),
            search: config.search.clone(),
            store: config.store.clone(),
            server: config.server.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let toml = r#"
[steam]
api_key = "key"
steam_id = "76561197960287930"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.steam.api_key, "key");
        assert_eq!(config.steam.web_api_url, "https://api.steampowered.com");
        assert_eq!(config.tools.prefix, "");
        assert_eq!(config.search.cache_ttl_secs, 86_400);
        assert_eq!(config.search.default_limit, 5);
        assert_eq!(config.store.connect_timeout_secs, 30);
        assert_eq!(config.server.transport, Transport::Stdio);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_deserialize_missing_steam_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_http_transport() {
        let toml = r#"
[steam]
api_key = "key"
steam_id = "gabelogannewell"

[server]
transport = "http"
host = "0.0.0.0"
port = 9000
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.transport, Transport::Http);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_durations() {
        let search = SearchConfig {
            cache_ttl_secs: 60,
            default_limit: 5,
        };
        assert_eq!(search.cache_ttl(), Duration::from_secs(60));
        assert_eq!(StoreConfig::default().connect_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let config = Config {
            steam: SteamConfig {
                api_key: "secret-key".to_string(),
                steam_id: "76561197960287930".to_string(),
                web_api_url: default_web_api_url(),
            },
            tools: ToolsConfig {
                prefix: "steam_".to_string(),
            },
            search: SearchConfig::default(),
            store: StoreConfig::default(),
            server: ServerConfig::default(),
        };

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.steam.api_key_configured);
        assert_eq!(sanitized.tools.prefix, "steam_");

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }
}
