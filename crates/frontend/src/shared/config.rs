use serde::Deserialize;
use thiserror::Error;

use crate::system::auth::storage;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend port on the page's host
    pub port: u16,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Absolute backend URL; overrides host and port when set
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Unknown level names fall back to `Info`
    pub fn level(&self) -> log::Level {
        self.level.parse().unwrap_or(log::Level::Info)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

fn default_prefix() -> String {
    "/api".to_string()
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
port = 8080
prefix = "/api"

[logging]
level = "debug"
"#;

pub fn parse_config(contents: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(contents)?)
}

/// Load configuration
///
/// Search order:
/// 1. TOML stored in localStorage under `epr_config`
/// 2. Falls back to embedded default config
pub fn load_config() -> Result<Config, ConfigError> {
    if let Some(contents) = storage::get_config_override() {
        log::info!("Loading config from localStorage");
        return parse_config(&contents);
    }
    parse_config(DEFAULT_CONFIG)
}

/// Configuration for startup: a broken override is reported and the default used
pub fn load_config_or_default() -> Config {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}; using default configuration", e);
            default_config()
        }
    }
}

fn default_config() -> Config {
    Config {
        api: ApiConfig {
            port: 8080,
            prefix: default_prefix(),
            base_url: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
    }
}
