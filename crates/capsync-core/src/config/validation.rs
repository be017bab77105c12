//! Configuration validation logic.

use crate::config::types::CapsyncConfig;
use crate::errors::ConfigError;

/// Longest accepted schedule interval: one year.
pub const MAX_INTERVAL_HOURS: u64 = 24 * 365;

/// Validate a CapsyncConfig, returning an error if any values are invalid.
///
/// # Validation Rules
///
/// - Schedule name must not be empty
/// - Schedule interval must be between one hour and [`MAX_INTERVAL_HOURS`]
/// - `max_consecutive_unavailable`, if set, must be at least 1
/// - HTTP timeout must be at least one second
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` describing the first invalid value.
pub fn validate_config(config: &CapsyncConfig) -> Result<(), ConfigError> {
    if config.schedule.name.trim().is_empty() {
        return Err(ConfigError::InvalidConfiguration {
            message: "schedule.name cannot be empty".to_string(),
        });
    }

    if config.schedule.interval_hours == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "schedule.interval_hours must be greater than 0".to_string(),
        });
    }

    if config.schedule.interval_hours > MAX_INTERVAL_HOURS {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "schedule.interval_hours must be at most {} (got {})",
                MAX_INTERVAL_HOURS, config.schedule.interval_hours
            ),
        });
    }

    if config.refresh.max_consecutive_unavailable == Some(0) {
        return Err(ConfigError::InvalidConfiguration {
            message: "refresh.max_consecutive_unavailable must be greater than 0 when set"
                .to_string(),
        });
    }

    if config.http.timeout_secs == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "http.timeout_secs must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&CapsyncConfig::default()).is_ok());
    }

    #[test]
    fn test_empty_schedule_name_rejected() {
        let mut config = CapsyncConfig::default();
        config.schedule.name = "  ".to_string();

        let result = validate_config(&config);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = CapsyncConfig::default();
        config.schedule.interval_hours = 0;

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("interval_hours"));
    }

    #[test]
    fn test_huge_interval_rejected() {
        let mut config = CapsyncConfig::default();
        config.schedule.interval_hours = 1_000_000_000_000;

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("at most"));

        config.schedule.interval_hours = MAX_INTERVAL_HOURS;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_unavailable_limit_rejected() {
        let mut config = CapsyncConfig::default();
        config.refresh.max_consecutive_unavailable = Some(0);
        assert!(validate_config(&config).is_err());

        config.refresh.max_consecutive_unavailable = Some(1);
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = CapsyncConfig::default();
        config.http.timeout_secs = 0;
        assert!(validate_config(&config).is_err());
    }
}
