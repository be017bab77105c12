//! # Configuration System
//!
//! Hierarchical TOML configuration for capsync.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.capsync/config.toml` (global user preferences)
//! 3. **Project config** - `./.capsync/config.toml` (local overrides)
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.capsync/config.toml
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
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use capsync_core::config::CapsyncConfig;
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CapsyncConfig::load_hierarchy()?;
//!     let interval = config.schedule.interval();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

pub use types::{CapsyncConfig, Config, HttpConfig, RefreshConfig, ScheduleConfig, StorageConfig};
pub use validation::validate_config;

impl CapsyncConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, Box<dyn std::error::Error>> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
