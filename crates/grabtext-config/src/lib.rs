use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::capture::CaptureConfig;
use self::hotkey::HotkeyConfig;
use self::service::ServiceConfig;

pub mod capture;
pub mod hotkey;
pub mod service;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("recognition endpoint is not configured (set VISION_ENDPOINT)")]
    MissingEndpoint,

    #[error("recognition subscription key is not configured (set VISION_KEY)")]
    MissingApiKey,

    #[error("request timeout must be at least one second")]
    ZeroTimeout,

    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub service: ServiceConfig,
    pub capture: CaptureConfig,
    pub hotkey: HotkeyConfig,
}

impl Config {
    /// Defaults overlaid with the process environment
    pub fn new() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_overrides(|name| env::var(name).ok())?;
        Ok(config)
    }

    /// Load a JSON config file, then overlay the process environment
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.apply_overrides(|name| env::var(name).ok())?;
        Ok(config)
    }

    /// Overlay values from `lookup` (normally the environment) onto this config
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(endpoint) = lookup("VISION_ENDPOINT") {
            self.service.endpoint = endpoint;
        }
        if let Some(key) = lookup("VISION_KEY") {
            self.service.api_key = key;
        }
        if let Some(language) = lookup("VISION_LANGUAGE") {
            let language = language.trim().to_string();
            self.service.language = (!language.is_empty()).then_some(language);
        }
        if let Some(value) = lookup("VISION_TIMEOUT_SECONDS") {
            self.service.timeout_seconds = parse_number("VISION_TIMEOUT_SECONDS", value)?;
        }
        if let Some(value) = lookup("CAPTURE_SETTLE_DELAY_MS") {
            self.capture.settle_delay_ms = parse_number("CAPTURE_SETTLE_DELAY_MS", value)?;
        }
        if let Some(combo) = lookup("CAPTURE_HOTKEY") {
            self.hotkey.combo = combo;
        }
        Ok(())
    }

    /// Fail fast on settings the recognition pipeline cannot run without
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.endpoint.trim().is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if self.service.api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        if self.service.timeout_seconds == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}

fn parse_number(name: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
