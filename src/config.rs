//! Top-level application configuration.
//!
//! Configuration is stored in `.shopdesk/config.yaml` and includes:
//! - The shop name shown in headers
//! - The signed-in user identity and manager flag
//! - The listing refresh interval for the browse TUI

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShopdeskError};
use crate::paths::shop_root;

pub const DEFAULT_SHOP_NAME: &str = "Dan's Computer Repair Shop";

/// Refresh interval bounds for the browse TUI, in seconds.
pub const MIN_POLL_INTERVAL: u64 = 30;
pub const MAX_POLL_INTERVAL: u64 = 60;

fn default_shop_name() -> String {
    DEFAULT_SHOP_NAME.to_string()
}

fn default_poll_interval() -> u64 {
    MIN_POLL_INTERVAL
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shop name shown in listing and TUI headers
    #[serde(default = "default_shop_name")]
    pub shop_name: String,

    /// Signed-in user; absent means signed out
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserConfig>,

    /// Listing refresh interval in seconds (default: 30)
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shop_name: default_shop_name(),
            user: None,
            poll_interval: default_poll_interval(),
        }
    }
}

/// Signed-in user identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub email: String,

    /// Managers may assign tickets to other technicians
    #[serde(default)]
    pub manager: bool,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> PathBuf {
        shop_root().join("config.yaml")
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            ShopdeskError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to read config at {}: {}",
                    crate::utils::format_relative_path(&path),
                    e
                ),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        crate::utils::ensure_parent_dir(&path)?;

        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            ShopdeskError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to write config at {}: {}",
                    crate::utils::format_relative_path(&path),
                    e
                ),
            ))
        })?;

        Ok(())
    }

    /// Refresh interval clamped to the supported window.
    pub fn poll_interval_secs(&self) -> u64 {
        self.poll_interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL)
    }

    /// The signed-in user, or an error suitable for mutation commands.
    pub fn require_user(&self) -> Result<&UserConfig> {
        self.user.as_ref().ok_or(ShopdeskError::NotSignedIn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.shop_name, DEFAULT_SHOP_NAME);
        assert!(config.user.is_none());
        assert_eq!(config.poll_interval, 30);
    }

    #[test]
    fn test_poll_interval_clamped() {
        let mut config = Config::default();
        config.poll_interval = 5;
        assert_eq!(config.poll_interval_secs(), 30);
        config.poll_interval = 45;
        assert_eq!(config.poll_interval_secs(), 45);
        config.poll_interval = 600;
        assert_eq!(config.poll_interval_secs(), 60);
    }

    #[test]
    fn test_require_user() {
        let mut config = Config::default();
        assert!(config.require_user().is_err());
        config.user = Some(UserConfig {
            email: "tech@example.com".to_string(),
            manager: false,
        });
        assert_eq!(config.require_user().unwrap().email, "tech@example.com");
    }

    #[test]
    fn test_deserialize_partial_yaml() {
        let config: Config = serde_yaml_ng::from_str("user:\n  email: dan@example.com\n").unwrap();
        assert_eq!(config.shop_name, DEFAULT_SHOP_NAME);
        assert_eq!(config.poll_interval, 30);
        let user = config.user.unwrap();
        assert_eq!(user.email, "dan@example.com");
        assert!(!user.manager);
    }
}
