//! Configuration type definitions for capsync.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [schedule]
//! name = "capabilities"
//! interval_hours = 24
//! require_network = true
//!
//! [refresh]
//! max_consecutive_unavailable = 5
//!
//! [http]
//! timeout_secs = 30
//! user_agent = "capsync"
//!
//! [storage]
//! data_dir = "/var/lib/capsync"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime paths for capsync.
///
/// Derived from environment variables, the `[storage]` section and system
/// defaults, not read directly from config files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all capsync data (default: ~/.capsync)
    pub data_dir: PathBuf,
}

/// Main configuration loaded from TOML config files.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CapsyncConfig {
    /// Periodic trigger registration
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Refresh policy
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Storage locations
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Periodic trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Logical name the trigger is registered under.
    /// Default: "capabilities".
    #[serde(default = "super::defaults::default_schedule_name")]
    pub name: String,

    /// Hours between two ticks.
    /// Default: 24.
    #[serde(default = "super::defaults::default_interval_hours")]
    pub interval_hours: u64,

    /// Only run when network connectivity is available.
    /// Default: true.
    #[serde(default = "super::defaults::default_require_network")]
    pub require_network: bool,
}

/// Refresh policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RefreshConfig {
    /// Number of consecutive "service unavailable" answers for one account
    /// after which the outcome is reported as fatal. Unset means never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_consecutive_unavailable: Option<u32>,
}

/// HTTP client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    /// Default: 30.
    #[serde(default = "super::defaults::default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request.
    #[serde(default = "super::defaults::default_user_agent")]
    pub user_agent: String,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding accounts, credentials and schedule registrations.
    /// Default: ~/.capsync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capsync_config_serialization() {
        let config = CapsyncConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: CapsyncConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.schedule.name, parsed.schedule.name);
        assert_eq!(config.schedule.interval_hours, parsed.schedule.interval_hours);
    }

    #[test]
    fn test_refresh_config_omits_unset_limit() {
        let toml_str = toml::to_string(&RefreshConfig::default()).unwrap();
        assert!(!toml_str.contains("max_consecutive_unavailable"));

        let config = RefreshConfig {
            max_consecutive_unavailable: Some(3),
        };
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("max_consecutive_unavailable = 3"));
    }

    #[test]
    fn test_storage_config_deserialize() {
        let toml_str = r#"
data_dir = "/srv/capsync"
"#;
        let storage: StorageConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(storage.data_dir, Some(PathBuf::from("/srv/capsync")));
    }
}
