//! Configuration management for us-census

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CensusError, Result};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Census API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Network settings
    #[serde(default)]
    pub network: NetworkConfig,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Census API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API key requested from census.gov
    pub key: Option<String>,
    /// Base URL of the Census Data API
    pub base_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// HTTP timeout in seconds
    pub timeout: u64,
    /// Serve cached responses only, never touch the network
    pub offline: bool,
}

/// Response cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether responses are cached at all
    pub enabled: bool,
    /// Cache directory
    pub dir: Option<PathBuf>,
    /// Age in hours after which a cached response is stale
    pub max_age_hours: u64,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format (pretty, json, csv)
    pub default_format: String,
    /// Enable colored output
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log file path
    pub file: Option<PathBuf>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            base_url: "https://api.census.gov".to_string(),
            user_agent: format!("{}/{}", crate::NAME, crate::VERSION),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            offline: false,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
            max_age_hours: 24,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "pretty".to_string(),
            color: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CensusError::Config("Could not find config directory".into()))?;
        Ok(config_dir.join("us-census").join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration, preferring an explicit path when given
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| CensusError::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset() -> Result<()> {
        let config = Self::default();
        config.save()
    }

    /// Initialize configuration file
    pub fn init(force: bool) -> Result<()> {
        let path = Self::config_path()?;

        if path.exists() && !force {
            return Err(CensusError::Config(
                "Configuration file already exists. Use --force to overwrite.".into(),
            ));
        }

        let config = Self::default();
        config.save()
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api.key" => self.api.key.clone(),
            "api.base_url" => Some(self.api.base_url.clone()),
            "api.user_agent" => Some(self.api.user_agent.clone()),

            "network.timeout" => Some(self.network.timeout.to_string()),
            "network.offline" => Some(self.network.offline.to_string()),

            "cache.enabled" => Some(self.cache.enabled.to_string()),
            "cache.dir" => self.cache.dir.as_ref().map(|p| p.display().to_string()),
            "cache.max_age_hours" => Some(self.cache.max_age_hours.to_string()),

            "output.default_format" => Some(self.output.default_format.clone()),
            "output.color" => Some(self.output.color.to_string()),

            "logging.level" => Some(self.logging.level.clone()),
            "logging.file" => self.logging.file.as_ref().map(|p| p.display().to_string()),

            _ => None,
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api.key" => {
                self.api.key = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "api.base_url" => {
                self.api.base_url = value.to_string();
            }
            "api.user_agent" => {
                self.api.user_agent = value.to_string();
            }

            "network.timeout" => {
                self.network.timeout = value
                    .parse()
                    .map_err(|_| CensusError::Config("Invalid number for timeout".into()))?;
            }
            "network.offline" => {
                self.network.offline = value
                    .parse()
                    .map_err(|_| CensusError::Config("Invalid boolean for offline".into()))?;
            }

            "cache.enabled" => {
                self.cache.enabled = value
                    .parse()
                    .map_err(|_| CensusError::Config("Invalid boolean for enabled".into()))?;
            }
            "cache.dir" => {
                self.cache.dir = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            "cache.max_age_hours" => {
                self.cache.max_age_hours = value
                    .parse()
                    .map_err(|_| CensusError::Config("Invalid number for max_age_hours".into()))?;
            }

            "output.default_format" => {
                self.output.default_format = value.to_string();
            }
            "output.color" => {
                self.output.color = value
                    .parse()
                    .map_err(|_| CensusError::Config("Invalid boolean for color".into()))?;
            }

            "logging.level" => {
                self.logging.level = value.to_string();
            }
            "logging.file" => {
                self.logging.file = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }

            _ => {
                return Err(CensusError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )));
            }
        }

        Ok(())
    }

    /// Get the cache directory
    pub fn cache_dir(&self) -> PathBuf {
        self.cache.dir.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .unwrap_or_else(|| PathBuf::from("/tmp"))
                .join("us-census")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "https://api.census.gov");
        assert!(config.api.key.is_none());
        assert_eq!(config.network.timeout, 30);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.max_age_hours, 24);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        config.set("api.key", "abc123").unwrap();
        assert_eq!(config.get("api.key"), Some("abc123".to_string()));

        config.set("network.timeout", "60").unwrap();
        assert_eq!(config.get("network.timeout"), Some("60".to_string()));

        config.set("network.offline", "true").unwrap();
        assert_eq!(config.get("network.offline"), Some("true".to_string()));

        assert!(config.set("network.timeout", "fast").is_err());
        assert!(config.set("no.such.key", "x").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\nkey = \"XYZ\"\nbase_url = \"https://api.census.gov\"\nuser_agent = \"test\"\n").unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.api.key.as_deref(), Some("XYZ"));
        // Unlisted sections fall back to defaults
        assert_eq!(config.network.timeout, 30);
    }
}
