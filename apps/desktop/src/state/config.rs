//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (later wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  4. Command-line flags (highest priority)                               │
//! │     --api-url, --export-dir, --no-prompt                                │
//! │                                                                         │
//! │  3. Environment Variables                                               │
//! │     SHOPFRONT_SHOP_NAME, SHOPFRONT_API_URL, SHOPFRONT_TIMEOUT_SECS,     │
//! │     SHOPFRONT_CURRENCY_SYMBOL, SHOPFRONT_EXPORT_DIR                     │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     --config <path>, or                                                 │
//! │     ~/.config/shopfront/shopfront.toml (Linux)                          │
//! │     ~/Library/Application Support/com.fashionworld.shopfront/ (macOS)   │
//! │                                                                         │
//! │  1. Defaults (this file)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # shopfront.toml
//! shop_name = "Fashion World"
//! api_base_url = "http://localhost:3001/api"
//! request_timeout_secs = 30
//! currency_symbol = "₹"
//! export_dir = "/home/cashier/Pictures"
//! interactive_save = true
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::{ProjectDirs, UserDirs};
use serde::{Deserialize, Serialize};
use shopfront_api::client::parse_base_url;
use shopfront_api::{ClientConfig, DEFAULT_BASE_URL};
use shopfront_core::{Money, DEFAULT_SHOP_NAME};
use tracing::{debug, info};

use crate::error::AppError;

/// Name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "shopfront.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Printed on labels and invoices
    pub shop_name: String,

    /// REST backend root, e.g. `http://localhost:3001/api`
    pub api_base_url: String,

    /// Per-request timeout
    pub request_timeout_secs: u64,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Where exported labels land by default
    pub export_dir: PathBuf,

    /// Ask for a path on every save instead of writing straight to
    /// `export_dir`
    pub interactive_save: bool,
}

impl Default for ConfigState {
    /// Returns default configuration suitable for development.
    ///
    /// ## Default Values
    /// - Shop: "Fashion World"
    /// - Backend: http://localhost:3001/api, 30 s timeout
    /// - Currency: ₹
    /// - Export: pictures directory, interactive prompt
    fn default() -> Self {
        ConfigState {
            shop_name: DEFAULT_SHOP_NAME.to_string(),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
            currency_symbol: "₹".to_string(),
            export_dir: default_export_dir(),
            interactive_save: true,
        }
    }
}

/// Values given on the command line. `None` leaves the lower layer alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub api_url: Option<String>,
    pub export_dir: Option<PathBuf>,
    pub no_prompt: bool,
}

impl ConfigState {
    /// Loads configuration from every source and validates the result.
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, AppError> {
        let mut config = match &overrides.config_path {
            // An explicit path must exist
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    ConfigState::default()
                }
            },
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_overrides(overrides);
        config.validate()?;

        info!(
            shop = %config.shop_name,
            api = %config.api_base_url,
            export_dir = %config.export_dir.display(),
            interactive_save = config.interactive_save,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reads a TOML file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&raw)
            .map_err(|e| AppError::config(format!("{}: {}", path.display(), e.message)))?;
        debug!(path = %path.display(), "Config file read");
        Ok(config)
    }

    /// Parses TOML text.
    pub fn from_toml(raw: &str) -> Result<Self, AppError> {
        toml::from_str(raw).map_err(|e| AppError::config(e.to_string()))
    }

    /// Applies `SHOPFRONT_*` variables.
    ///
    /// ## Environment Variables
    /// - `SHOPFRONT_SHOP_NAME`
    /// - `SHOPFRONT_API_URL`
    /// - `SHOPFRONT_TIMEOUT_SECS` (whole seconds)
    /// - `SHOPFRONT_CURRENCY_SYMBOL`
    /// - `SHOPFRONT_EXPORT_DIR`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(shop_name) = lookup("SHOPFRONT_SHOP_NAME") {
            self.shop_name = shop_name;
        }

        if let Some(url) = lookup("SHOPFRONT_API_URL") {
            self.api_base_url = url;
        }

        if let Some(secs) = lookup("SHOPFRONT_TIMEOUT_SECS") {
            self.request_timeout_secs = secs.trim().parse().map_err(|_| {
                AppError::config(format!(
                    "SHOPFRONT_TIMEOUT_SECS must be a whole number, got '{}'",
                    secs
                ))
            })?;
        }

        if let Some(symbol) = lookup("SHOPFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(dir) = lookup("SHOPFRONT_EXPORT_DIR") {
            self.export_dir = PathBuf::from(dir);
        }

        Ok(())
    }

    /// Applies command-line flags.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_url {
            self.api_base_url = url.clone();
        }
        if let Some(dir) = &overrides.export_dir {
            self.export_dir = dir.clone();
        }
        if overrides.no_prompt {
            self.interactive_save = false;
        }
    }

    /// Rejects configurations the app cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.shop_name.trim().is_empty() {
            return Err(AppError::config("shop_name cannot be empty"));
        }
        if self.request_timeout_secs == 0 {
            return Err(AppError::config("request_timeout_secs must be greater than 0"));
        }
        parse_base_url(&self.api_base_url).map_err(|e| AppError::config(e.to_string()))?;
        Ok(())
    }

    /// HTTP client settings derived from this configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api_base_url.clone())
            .timeout(Duration::from_secs(self.request_timeout_secs))
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(123450)), "₹1234.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

/// `<config dir>/shopfront.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "fashionworld", "shopfront")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Pictures directory, then the app data directory, then `.`.
fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(Path::to_path_buf))
        .or_else(|| {
            ProjectDirs::from("com", "fashionworld", "shopfront")
                .map(|dirs| dirs.data_dir().to_path_buf())
        })
        .unwrap_or_else(|| PathBuf::from("."))
}
