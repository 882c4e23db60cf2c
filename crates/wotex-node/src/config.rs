//! Node configuration loading and management.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use wotex_core::ExplorerConfig;

/// Full configuration for the wotex node.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WotexConfig {
    /// HTTP API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Dataset settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Trust-distance computation settings.
    #[serde(default)]
    pub explorer: ExplorerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API listen address.
    #[serde(default = "default_api_addr")]
    pub listen_addr: String,
    /// API port.
    #[serde(default = "default_api_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path to the JSON web-of-trust dataset.
    #[serde(default = "default_dataset")]
    pub dataset: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_api_addr() -> String {
    "127.0.0.1".into()
}
fn default_api_port() -> u16 {
    8558
}
fn default_dataset() -> PathBuf {
    PathBuf::from("./wotex/dataset.json")
}
fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> String {
    "text".into()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_api_addr(),
            port: default_api_port(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dataset: default_dataset(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl WotexConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            let config: WotexConfig = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save the current config to a TOML file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Socket address of the HTTP API.
    pub fn api_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.api.listen_addr, self.api.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid API address {addr}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WotexConfig::default();
        assert_eq!(config.api.port, 8558);
        assert_eq!(config.api.listen_addr, "127.0.0.1");
        assert_eq!(config.storage.dataset, PathBuf::from("./wotex/dataset.json"));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
        assert_eq!(config.explorer.max_hops(), 5);
    }

    #[test]
    fn test_api_addr() {
        let config = WotexConfig::default();
        assert_eq!(config.api_addr().unwrap().to_string(), "127.0.0.1:8558");

        let mut config = WotexConfig::default();
        config.api.listen_addr = "not an address".into();
        assert!(config.api_addr().is_err());
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = WotexConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let decoded: WotexConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(decoded.api.port, config.api.port);
        assert_eq!(decoded.explorer.step_max, config.explorer.step_max);
        assert_eq!(decoded.explorer.max_hops, None);
    }

    #[test]
    fn test_config_load_nonexistent_uses_defaults() {
        let config = WotexConfig::load(Path::new("/nonexistent/wotex.toml")).unwrap();
        assert_eq!(config.api.port, 8558);
    }

    #[test]
    fn test_config_from_toml_partial() {
        let toml_str = r#"
[api]
port = 9100

[logging]
format = "json"

[explorer]
step_max = 3
max_hops = 4
"#;
        let config: WotexConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.api.port, 9100);
        assert_eq!(config.api.listen_addr, "127.0.0.1");
        assert!(config.logging.is_json());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.explorer.step_max, 3);
        assert_eq!(config.explorer.max_hops(), 4);
        assert_eq!(config.explorer.dsen_p, 1.0);
    }
}
