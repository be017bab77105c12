//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{Config, HttpConfig, ScheduleConfig, StorageConfig};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CAPSYNC_DATA_DIR";

/// Returns the default logical schedule name.
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_schedule_name() -> String {
    "capabilities".to_string()
}

/// Returns the default refresh interval (24 hours).
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_interval_hours() -> u64 {
    24
}

/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_require_network() -> bool {
    true
}

/// Returns the default HTTP timeout in seconds (30s).
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_timeout_secs() -> u64 {
    30
}

/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_user_agent() -> String {
    format!("capsync/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            name: default_schedule_name(),
            interval_hours: default_interval_hours(),
            require_network: default_require_network(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_storage(&StorageConfig::default())
    }
}

fn home_data_dir() -> PathBuf {
    match dirs::home_dir() {
        Some(home) => home.join(".capsync"),
        None => {
            tracing::warn!(
                event = "core.config.home_dir_not_found",
                "Could not find home directory, using temp directory for capsync data"
            );
            std::env::temp_dir().join(".capsync")
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve runtime paths.
    ///
    /// Resolution order: `CAPSYNC_DATA_DIR`, then `[storage] data_dir`,
    /// then `~/.capsync`.
    pub fn from_storage(storage: &StorageConfig) -> Self {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            return Self::at(dir);
        }

        match &storage.data_dir {
            Some(dir) => Self::at(dir.clone()),
            None => Self::at(home_data_dir()),
        }
    }

    /// Use an explicit data directory.
    pub fn at(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn accounts_file(&self) -> PathBuf {
        self.data_dir.join("accounts.json")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.data_dir.join("credentials.toml")
    }

    pub fn schedules_file(&self) -> PathBuf {
        self.data_dir.join("schedules.json")
    }
}

impl ScheduleConfig {
    /// Saturates instead of overflowing for unvalidated values.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_hours.saturating_mul(60 * 60))
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CapsyncConfig;

    #[test]
    fn test_config_paths() {
        let config = Config::at("/tmp/capsync-test");
        assert_eq!(
            config.accounts_file(),
            PathBuf::from("/tmp/capsync-test/accounts.json")
        );
        assert_eq!(
            config.credentials_file(),
            PathBuf::from("/tmp/capsync-test/credentials.toml")
        );
        assert_eq!(
            config.schedules_file(),
            PathBuf::from("/tmp/capsync-test/schedules.json")
        );
    }

    #[test]
    fn test_capsync_config_defaults() {
        let config = CapsyncConfig::default();
        assert_eq!(config.schedule.name, "capabilities");
        assert_eq!(config.schedule.interval_hours, 24);
        assert!(config.schedule.require_network);
        assert!(config.refresh.max_consecutive_unavailable.is_none());
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.user_agent.starts_with("capsync/"));
        assert!(config.storage.data_dir.is_none());
    }

    #[test]
    fn test_schedule_interval_is_24_hours() {
        let config = ScheduleConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(86_400));
    }

    #[test]
    fn test_schedule_interval_saturates() {
        let config = ScheduleConfig {
            interval_hours: u64::MAX,
            ..Default::default()
        };
        assert_eq!(config.interval(), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn test_schedule_config_serde_defaults() {
        let toml_str = r#"
[schedule]
name = "caps"
"#;
        let config: CapsyncConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.schedule.name, "caps");
        assert_eq!(
            config.schedule.interval_hours, 24,
            "interval_hours should default to 24 when missing"
        );
        assert!(config.schedule.require_network);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_explicit_values_preserved() {
        let toml_str = r#"
[schedule]
require_network = false

[http]
timeout_secs = 5
"#;
        let config: CapsyncConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.schedule.require_network);
        assert_eq!(config.http.timeout_secs, 5);
    }
}
