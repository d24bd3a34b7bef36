use crate::DEFAULT_API_BASE_URL;
use crate::error::config::ConfigError;
use crate::session::Portal;

use common::ErrorLocation;
use models::PageLimit;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info};
use serde::{Deserialize, Serialize};

const CONFIG_DIR_NAME: &str = "board-client";
const CONFIG_FILE_NAME: &str = "config.toml";

pub const ENV_API_BASE_URL: &str = "BOARD_API_BASE_URL";
pub const ENV_API_TIMEOUT_SECS: &str = "BOARD_API_TIMEOUT_SECS";
pub const ENV_PAGE_SIZE: &str = "BOARD_PAGE_SIZE";

const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingConfig {
    #[serde(default)]
    pub page_size: PageLimit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub paging: PagingConfig,

    #[serde(default)]
    pub portal: Portal,
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// `{config_dir}/board-client/config.toml`
    #[track_caller]
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load config from a TOML file.
    ///
    /// # Returns
    ///
    /// Returns defaults if the file does not exist.
    /// Returns `Err(ConfigError)` if the file exists but is unreadable or invalid.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.to_path_buf(),
                source: e,
            })?;

        let config: ClientConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// File (or the default path), then `.env`, then process environment.
    pub fn resolve(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = Self::load(&path)?;
        load_dotenv();
        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply `BOARD_*` environment variables on top of the current values.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(base_url) = read_env(ENV_API_BASE_URL)? {
            debug!("Overriding base URL from {ENV_API_BASE_URL}");
            self.api.base_url = base_url;
        }

        if let Some(raw) = read_env(ENV_API_TIMEOUT_SECS)? {
            self.api.timeout_secs = raw.trim().parse().map_err(|e| ConfigError::EnvError {
                location: ErrorLocation::from(Location::caller()),
                variable: ENV_API_TIMEOUT_SECS,
                reason: format!("'{raw}' is not a number: {e}"),
            })?;
        }

        if let Some(raw) = read_env(ENV_PAGE_SIZE)? {
            let size: u32 = raw.trim().parse().map_err(|e| ConfigError::EnvError {
                location: ErrorLocation::from(Location::caller()),
                variable: ENV_PAGE_SIZE,
                reason: format!("'{raw}' is not a number: {e}"),
            })?;
            self.paging.page_size = PageLimit::new(size).map_err(|e| ConfigError::EnvError {
                location: ErrorLocation::from(Location::caller()),
                variable: ENV_PAGE_SIZE,
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = &self.api.base_url;

        if base_url.is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: "base_url cannot be empty".to_string(),
            });
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL format: {base_url}"),
            });
        }

        if let Err(e) = url::Url::parse(base_url) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid URL '{base_url}': {e}"),
            });
        }

        if !(MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS).contains(&self.api.timeout_secs) {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::from(Location::caller()),
                reason: format!(
                    "Invalid timeout: {}s (must be {MIN_TIMEOUT_SECS}-{MAX_TIMEOUT_SECS})",
                    self.api.timeout_secs
                ),
            });
        }

        Ok(())
    }
}

/// Load `.env` from the working directory if present (non-fatal).
pub fn load_dotenv() -> Option<PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => {
            info!("Loaded .env from: {}", path.display());
            Some(path)
        }
        Err(e) => {
            debug!("No .env loaded: {e}");
            None
        }
    }
}

#[track_caller]
fn read_env(variable: &'static str) -> Result<Option<String>, ConfigError> {
    match env::var(variable) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::EnvError {
            location: ErrorLocation::from(Location::caller()),
            variable,
            reason: "contains invalid unicode".to_string(),
        }),
    }
}
