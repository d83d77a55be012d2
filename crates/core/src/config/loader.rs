use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable holding an optional TOML config path
pub const CONFIG_PATH_ENV: &str = "STEAM_GAMES_CONFIG";

/// Prefix for nested overrides, e.g. `STEAM_GAMES_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "STEAM_GAMES_";

/// Load configuration from an optional TOML file with environment variable overrides.
///
/// Precedence (lowest to highest): serde defaults, TOML file,
/// `STEAM_GAMES_*` variables, then the flat `STEAM_API_KEY` / `STEAM_ID` /
/// `TOOL_PREFIX` variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let mut figment = Figment::new();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        figment = figment.merge(Toml::file(path));
    }

    let config: Config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .merge(flat_env())
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// The unprefixed variables most MCP client setups already pass.
fn flat_env() -> Env {
    Env::raw()
        .only(&["STEAM_API_KEY", "STEAM_ID", "TOOL_PREFIX"])
        .map(|key| {
            let k = key.as_str();
            if k.eq_ignore_ascii_case("STEAM_API_KEY") {
                "steam.api_key".into()
            } else if k.eq_ignore_ascii_case("STEAM_ID") {
                "steam.steam_id".into()
            } else if k.eq_ignore_ascii_case("TOOL_PREFIX") {
                "tools.prefix".into()
            } else {
                key.into()
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Transport;
    use figment::Jail;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[steam]
api_key = "key"
steam_id = "76561197960287930"

[search]
default_limit = 10
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.search.default_limit, 10);
    }

    #[test]
    fn test_load_config_from_str_missing_steam() {
        let toml = r#"
[server]
port = 8080
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[steam]
api_key = "file-key"
steam_id = "76561197960287930"

[server]
transport = "http"
port = 3000
"#
        )
        .unwrap();

        Jail::expect_with(|_jail| {
            let config = load_config(Some(temp_file.path())).unwrap();
            assert_eq!(config.steam.api_key, "file-key");
            assert_eq!(config.server.transport, Transport::Http);
            assert_eq!(config.server.port, 3000);
            Ok(())
        });
    }

    #[test]
    fn test_load_config_from_flat_env() {
        Jail::expect_with(|jail| {
            jail.set_env("STEAM_API_KEY", "env-key");
            jail.set_env("STEAM_ID", "76561197960287930");
            jail.set_env("TOOL_PREFIX", "steam_");

            let config = load_config(None).unwrap();
            assert_eq!(config.steam.api_key, "env-key");
            assert_eq!(config.steam.steam_id, "76561197960287930");
            assert_eq!(config.tools.prefix, "steam_");
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
[steam]
api_key = "file-key"
steam_id = "someone"

[search]
cache_ttl_secs = 60
"#,
            )?;
            jail.set_env("STEAM_GAMES_SEARCH__CACHE_TTL_SECS", "120");
            jail.set_env("STEAM_API_KEY", "env-key");

            let config = load_config(Some(Path::new("config.toml"))).unwrap();
            assert_eq!(config.search.cache_ttl_secs, 120);
            assert_eq!(config.steam.api_key, "env-key");
            assert_eq!(config.steam.steam_id, "someone");
            Ok(())
        });
    }

    #[test]
    fn test_load_config_without_credentials_fails() {
        Jail::expect_with(|_jail| {
            let result = load_config(None);
            assert!(matches!(result, Err(ConfigError::ParseError(_))));
            Ok(())
        });
    }
}
