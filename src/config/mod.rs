//! Configuration module for autosuggest
//!
//! Construction-time settings for the input controller and the terminal
//! front end. Configuration is read from the user's config directory
//! (`~/.config/autosuggest/config.toml` on Linux); missing files and missing
//! keys fall back to defaults.

use crate::controller::ControllerConfig;
use crate::matcher::MatchStrategy;
use crate::source::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Response cache settings for remote sources
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Seconds a cached response stays valid
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,

    /// Number of queries kept; 0 disables the cache
    #[serde(default = "default_cache_capacity")]
    pub capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            capacity: default_cache_capacity(),
        }
    }
}

impl CacheConfig {
    /// Cache time-to-live as a duration
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AutosuggestConfig {
    /// Value the input starts with
    #[serde(default)]
    pub initial_value: String,

    /// Quiet period in milliseconds before a remote lookup fires
    #[serde(default = "default_debounce_interval_ms")]
    pub debounce_interval_ms: u64,

    /// How queries are compared against candidates
    #[serde(default)]
    pub match_strategy: MatchStrategy,

    /// Re-filter remote results locally before showing them
    #[serde(default = "default_true")]
    pub refilter_remote: bool,

    /// Maximum number of suggestion rows drawn by the terminal front end
    #[serde(default = "default_max_visible")]
    pub max_visible: usize,

    /// Remote response cache
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Default for AutosuggestConfig {
    fn default() -> Self {
        Self {
            initial_value: String::new(),
            debounce_interval_ms: default_debounce_interval_ms(),
            match_strategy: MatchStrategy::default(),
            refilter_remote: true,
            max_visible: default_max_visible(),
            cache: CacheConfig::default(),
        }
    }
}

const fn default_debounce_interval_ms() -> u64 {
    250
}

const fn default_max_visible() -> usize {
    8
}

const fn default_true() -> bool {
    true
}

const fn default_cache_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

const fn default_cache_capacity() -> u64 {
    DEFAULT_CACHE_CAPACITY
}

impl AutosuggestConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("autosuggest").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// Returns defaults when no config file exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific TOML file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Check values that deserialize fine but make no sense
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `max_visible` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_visible == 0 {
            return Err(ConfigError::Message("max_visible must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Debounce interval as a duration
    #[must_use]
    pub const fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.debounce_interval_ms)
    }

    /// Controller settings derived from this configuration
    #[must_use]
    pub fn controller_config(&self) -> ControllerConfig {
        ControllerConfig::default()
            .with_initial_value(self.initial_value.clone())
            .with_debounce_interval(self.debounce_interval())
            .with_match_strategy(self.match_strategy)
            .with_refilter_remote(self.refilter_remote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AutosuggestConfig::default();
        assert_eq!(config.debounce_interval(), Duration::from_millis(250));
        assert_eq!(config.match_strategy, MatchStrategy::Substring);
        assert!(config.refilter_remote);
        assert_eq!(config.max_visible, 8);
        assert_eq!(config.cache.ttl(), Duration::from_secs(300));
        assert_eq!(config.cache.capacity, 256);
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce_interval_ms = 100\nmatch_strategy = \"pattern\"\n").unwrap();

        let config = AutosuggestConfig::load_from(&path).unwrap();
        assert_eq!(config.debounce_interval_ms, 100);
        assert_eq!(config.match_strategy, MatchStrategy::Pattern);
        assert_eq!(config.max_visible, 8);
        assert_eq!(config.cache, CacheConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = AutosuggestConfig {
            initial_value: "star".to_string(),
            cache: CacheConfig { ttl_secs: 10, capacity: 0 },
            ..AutosuggestConfig::default()
        };
        config.save_to(&path).unwrap();

        assert_eq!(AutosuggestConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_zero_max_visible_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_visible = 0\n").unwrap();

        let err = AutosuggestConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("max_visible"));
    }

    #[test]
    fn test_controller_config() {
        let config = AutosuggestConfig {
            initial_value: "go".to_string(),
            debounce_interval_ms: 0,
            refilter_remote: false,
            ..AutosuggestConfig::default()
        };

        let controller = config.controller_config();
        assert_eq!(controller.initial_value, "go");
        assert_eq!(controller.debounce_interval, Duration::ZERO);
        assert!(!controller.refilter_remote);
        assert!(!controller.fetch_on_mount);
    }
}
