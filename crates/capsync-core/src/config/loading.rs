//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.capsync/config.toml`
//! 3. **Project config** - `./.capsync/config.toml`

use crate::config::types::CapsyncConfig;
use crate::config::validation::validate_config;
use std::fs;
use std::path::{Path, PathBuf};

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::NotFound;
    }

    let err_str = e.to_string();
    err_str.contains("No such file or directory") || err_str.contains("cannot find the path")
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if a config file cannot be parsed or validation fails.
/// Missing config files are not errors.
pub fn load_hierarchy() -> Result<CapsyncConfig, Box<dyn std::error::Error>> {
    let mut layers = Vec::new();
    match dirs::home_dir() {
        Some(home) => layers.push(home.join(".capsync").join("config.toml")),
        None => tracing::warn!(
            event = "core.config.home_dir_not_found",
            "Could not find home directory, skipping user config"
        ),
    }
    layers.push(std::env::current_dir()?.join(".capsync").join("config.toml"));

    load_layers(&layers)
}

/// Load and merge config files in order, later files overriding earlier
/// ones key by key. Keys a file does not mention keep their earlier value.
pub fn load_layers(paths: &[PathBuf]) -> Result<CapsyncConfig, Box<dyn std::error::Error>> {
    let mut merged = toml::Table::new();

    for path in paths {
        match read_table(path) {
            Ok(table) => {
                // Report type errors against the file that contains them.
                table_to_config(table.clone(), path)?;
                merge_tables(&mut merged, table);
            }
            Err(e) if is_file_not_found(e.as_ref()) => {}
            Err(e) => return Err(e),
        }
    }

    let config: CapsyncConfig = toml::Value::Table(merged)
        .try_into()
        .map_err(|e| format!("Failed to merge config files: {}", e))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load a configuration file from the given path.
///
/// Read errors keep their `std::io::Error` so a missing file can be told
/// apart from a broken one.
pub fn load_config_file(path: &Path) -> Result<CapsyncConfig, Box<dyn std::error::Error>> {
    let table = read_table(path)?;
    table_to_config(table, path)
}

fn read_table(path: &Path) -> Result<toml::Table, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let table: toml::Table = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(table)
}

fn table_to_config(
    table: toml::Table,
    path: &Path,
) -> Result<CapsyncConfig, Box<dyn std::error::Error>> {
    let config = toml::Value::Table(table)
        .try_into()
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Deep-merge `overlay` into `base`. Nested tables merge recursively; any
/// other value in `overlay` replaces the one in `base`.
pub fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        if let toml::Value::Table(overlay_table) = value {
            if let Some(toml::Value::Table(base_table)) = base.get_mut(&key) {
                merge_tables(base_table, overlay_table);
                continue;
            }
            base.insert(key, toml::Value::Table(overlay_table));
        } else {
            base.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_unrelated_project_file_keeps_user_schedule() {
        let dir = tempfile::tempdir().unwrap();
        let user = write(
            dir.path(),
            "user.toml",
            "[schedule]\nname = \"caps-user\"\ninterval_hours = 6\n",
        );
        let project = write(dir.path(), "project.toml", "[http]\ntimeout_secs = 10\n");

        let config = load_layers(&[user, project]).unwrap();

        assert_eq!(config.schedule.name, "caps-user");
        assert_eq!(config.schedule.interval_hours, 6);
        assert!(config.schedule.require_network);
        assert_eq!(config.http.timeout_secs, 10);
        assert!(config.http.user_agent.starts_with("capsync/"));
    }

    #[test]
    fn test_project_overrides_single_key() {
        let dir = tempfile::tempdir().unwrap();
        let user = write(
            dir.path(),
            "user.toml",
            "[schedule]\nname = \"caps-user\"\ninterval_hours = 6\n\n[refresh]\nmax_consecutive_unavailable = 4\n",
        );
        let project = write(dir.path(), "project.toml", "[schedule]\ninterval_hours = 12\n");

        let config = load_layers(&[user, project]).unwrap();

        assert_eq!(config.schedule.name, "caps-user");
        assert_eq!(config.schedule.interval_hours, 12);
        assert_eq!(config.refresh.max_consecutive_unavailable, Some(4));
    }

    #[test]
    fn test_missing_layers_give_defaults() {
        let dir = tempfile::tempdir().unwrap();

        let config = load_layers(&[dir.path().join("absent.toml")]).unwrap();

        assert_eq!(config.schedule.name, "capabilities");
        assert_eq!(config.schedule.interval_hours, 24);
    }

    #[test]
    fn test_type_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let user = write(dir.path(), "user.toml", "[schedule]\ninterval_hours = \"six\"\n");

        let err = load_layers(&[user]).unwrap_err();
        assert!(err.to_string().contains("user.toml"));
    }

    #[test]
    fn test_merged_config_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let project = write(dir.path(), "project.toml", "[schedule]\ninterval_hours = 0\n");

        assert!(load_layers(&[project]).is_err());
    }

    #[test]
    fn test_merge_tables_is_deep() {
        let mut base: toml::Table = toml::from_str("[a]\nx = 1\ny = 2\n").unwrap();
        let overlay: toml::Table = toml::from_str("[a]\ny = 3\n[b]\nz = 4\n").unwrap();

        merge_tables(&mut base, overlay);

        assert_eq!(base["a"]["x"].as_integer(), Some(1));
        assert_eq!(base["a"]["y"].as_integer(), Some(3));
        assert_eq!(base["b"]["z"].as_integer(), Some(4));
    }

    #[test]
    fn test_load_config_file_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_file(&dir.path().join("config.toml")).unwrap_err();
        assert!(is_file_not_found(err.as_ref()));
    }

    #[test]
    fn test_load_config_file_parse_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[schedule\ninterval_hours = ").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(!is_file_not_found(err.as_ref()));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_config_file_reads_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[schedule]
interval_hours = 6

[refresh]
max_consecutive_unavailable = 3
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.schedule.interval_hours, 6);
        assert_eq!(config.schedule.name, "capabilities");
        assert_eq!(config.refresh.max_consecutive_unavailable, Some(3));
    }
}
