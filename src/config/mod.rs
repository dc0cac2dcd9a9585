//! Configuration module for the AnimeAV1 provider
//!
//! This module handles provider configuration:
//! - Site and CDN base URLs used to build every request and asset URL
//! - HTTP transport settings
//! - Language for synthesized episode titles
//!
//! # Config Location
//!
//! The config file is TOML, read from an explicit path or from the
//! platform-appropriate config directory under `animeav1-rs`:
//! - **Linux**: `~/.config/animeav1-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/animeav1-rs/config.toml`
//! - **Windows**: `%APPDATA%\animeav1-rs\config.toml`
//!
//! # Environment Overrides
//!
//! Applied after the file is read:
//! - `ANIMEAV1_BASE_URL`
//! - `ANIMEAV1_CDN_URL`
//! - `ANIMEAV1_TIMEOUT_SECS`
//!
//! # Example
//!
//! ```toml
//! base_url = "https://animeav1.com"
//! cdn_url = "https://cdn.animeav1.com"
//! language = "es"
//!
//! [http]
//! timeout_secs = 15
//! ```

pub mod settings;

pub use settings::*;

use crate::error::{ProviderError, Result, ResultExt};
use crate::i18n::Language;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application identifier for config directories
pub const APP_ID: &str = "animeav1-rs";

/// Config filename
pub const CONFIG_FILE: &str = "config.toml";

/// Default site URL
pub const DEFAULT_BASE_URL: &str = "https://animeav1.com";

/// Default asset CDN URL
pub const DEFAULT_CDN_URL: &str = "https://cdn.animeav1.com";

/// Environment variable overriding [`ProviderConfig::base_url`]
pub const ENV_BASE_URL: &str = "ANIMEAV1_BASE_URL";

/// Environment variable overriding [`ProviderConfig::cdn_url`]
pub const ENV_CDN_URL: &str = "ANIMEAV1_CDN_URL";

/// Environment variable overriding [`HttpSettings::timeout_secs`]
pub const ENV_TIMEOUT_SECS: &str = "ANIMEAV1_TIMEOUT_SECS";

/// Get the default config file path
pub fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|p| p.join(APP_ID).join(CONFIG_FILE))
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Site origin, without trailing slash
    pub base_url: String,

    /// Asset CDN origin, without trailing slash
    pub cdn_url: String,

    /// Language for synthesized episode titles
    pub language: Language,

    /// HTTP transport settings
    pub http: HttpSettings,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            cdn_url: DEFAULT_CDN_URL.to_string(),
            language: Language::default(),
            http: HttpSettings::default(),
        }
    }
}

impl ProviderConfig {
    /// Parse config from TOML text, then normalize and validate it
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ProviderError::Config(format!("Failed to parse config: {}", e)))?;
        config.normalized()
    }

    /// Load config from a TOML file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(ProviderError::from)
            .with_context(|| format!("Failed to read config {:?}", path))?;

        Self::from_toml(&content)?.with_env_overrides()
    }

    /// Load from `path`, or the default location when `None`
    ///
    /// A missing default file is not an error. Any other failure is logged
    /// and the defaults (plus environment overrides) are used.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(default) if default.exists() => Self::load(default),
                _ => Self::default().with_env_overrides(),
            },
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Apply `ANIMEAV1_*` environment overrides
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            self.base_url = url;
        }
        if let Ok(url) = std::env::var(ENV_CDN_URL) {
            self.cdn_url = url;
        }
        if let Ok(secs) = std::env::var(ENV_TIMEOUT_SECS) {
            self.http.timeout_secs = secs.trim().parse().map_err(|_| {
                ProviderError::Config(format!("{} must be an integer, got '{}'", ENV_TIMEOUT_SECS, secs))
            })?;
        }
        self.normalized()
    }

    /// Save config to a TOML file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ProviderError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ProviderError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ProviderError::Config(format!("Failed to write config: {}", e)))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("base_url", &self.base_url), ("cdn_url", &self.cdn_url)] {
            if url.is_empty() {
                return Err(ProviderError::Config(format!("{} cannot be empty", name)));
            }
            reqwest::Url::parse(url).map_err(|e| {
                ProviderError::Config(format!("{} '{}' is not a valid URL: {}", name, url, e))
            })?;
        }
        if self.http.timeout_secs == 0 {
            return Err(ProviderError::Config("http.timeout_secs must be > 0".to_string()));
        }
        Ok(())
    }

    /// Trim trailing slashes so URL templates join cleanly, then validate
    fn normalized(mut self) -> Result<Self> {
        self.base_url = self.base_url.trim_end_matches('/').to_string();
        self.cdn_url = self.cdn_url.trim_end_matches('/').to_string();
        self.validate()?;
        Ok(self)
    }
}
