//! # Client Configuration
//!
//! Where the backend lives and how the dashboard presents amounts.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PHARMA_API_URL=http://10.0.0.5:8000/api                            │
//! │     PHARMA_TIMEOUT_SECS=20                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/pharmacy-crm/pharmacy.toml (Linux)                       │
//! │     ~/Library/Application Support/com.pharmacy.pharmacy-crm/... (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:8000/api, 10s timeout                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # pharmacy.toml
//! [backend]
//! base_url = "http://localhost:8000/api"
//! timeout_secs = 10
//! recent_sales_limit = 5
//! catalog_page_size = 100
//!
//! [display]
//! currency_symbol = "₹"
//! currency_decimals = 2
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "pharmacy.toml";

// =============================================================================
// Backend Settings
// =============================================================================

/// How to reach the pharmacy backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Base URL including the `/api` prefix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of sales shown under "Recent Sales".
    #[serde(default = "default_recent_sales_limit")]
    pub recent_sales_limit: u32,

    /// `limit` sent with catalog requests.
    #[serde(default = "default_catalog_page_size")]
    pub catalog_page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_recent_sales_limit() -> u32 {
    5
}

fn default_catalog_page_size() -> u32 {
    100
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            recent_sales_limit: default_recent_sales_limit(),
            catalog_page_size: default_catalog_page_size(),
        }
    }
}

// =============================================================================
// Display Settings
// =============================================================================

/// How amounts are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Digits after the decimal point. Amounts are held in hundredths, so
    /// only 0-2 are meaningful.
    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (pharmacy.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)
            .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        self.base_url()?;

        if self.backend.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.backend.recent_sales_limit == 0 {
            return Err(ClientError::InvalidConfig(
                "recent_sales_limit must be greater than 0".into(),
            ));
        }

        if self.backend.catalog_page_size == 0 {
            return Err(ClientError::InvalidConfig(
                "catalog_page_size must be greater than 0".into(),
            ));
        }

        if self.display.currency_decimals > 2 {
            return Err(ClientError::InvalidConfig(
                "currency_decimals must be 0, 1 or 2".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `PHARMA_*` overrides from `lookup`. Unparseable numbers are
    /// ignored with a warning.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("PHARMA_API_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Some(timeout) = lookup("PHARMA_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(t) => self.backend.timeout_secs = t,
                Err(_) => warn!(value = %timeout, "Ignoring invalid PHARMA_TIMEOUT_SECS"),
            }
        }

        if let Some(limit) = lookup("PHARMA_RECENT_SALES_LIMIT") {
            match limit.parse::<u32>() {
                Ok(l) => self.backend.recent_sales_limit = l,
                Err(_) => warn!(value = %limit, "Ignoring invalid PHARMA_RECENT_SALES_LIMIT"),
            }
        }

        if let Some(symbol) = lookup("PHARMA_CURRENCY_SYMBOL") {
            self.display.currency_symbol = symbol;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pharmacy", "pharmacy-crm")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Parsed base URL, always ending in `/` so relative joins keep the
    /// `/api` prefix.
    pub fn base_url(&self) -> ClientResult<Url> {
        let raw = self.backend.base_url.trim();
        let with_slash = if raw.ends_with('/') {
            raw.to_string()
        } else {
            format!("{raw}/")
        };

        let url = Url::parse(&with_slash)?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ClientError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got scheme '{other}'"
            ))),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }
}
