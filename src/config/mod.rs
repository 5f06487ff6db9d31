use crate::constants::env_vars;
use crate::constants::paths::LOG_FILE_NAME;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub mod paths;
pub mod validation;

use paths::{get_config_path, get_log_dir_path};
use validation::validate_config;

/// Configuration structure for the application.
/// Handles loading, saving, and managing application settings.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    /// JSON snapshot the results provider answers from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<String>,
    /// Season used to scope the team list and the default event list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<i32>,
    /// Path to the log file. If not specified, logs will be written to a default location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file_path: Option<String>,
}

impl Config {
    /// Loads configuration from the default config file location.
    /// Environment variables override config file values.
    ///
    /// # Environment Variables
    /// - `FRC_RECORDS_SNAPSHOT` - Override snapshot path
    /// - `FRC_RECORDS_SEASON` - Override season
    /// - `FRC_RECORDS_LOG_FILE` - Override log file path
    ///
    /// # Notes
    /// - A missing config file yields the defaults; nothing is written
    /// - The result is validated before it is returned
    pub fn load() -> Result<Self, AppError> {
        Self::load_or_default(&get_config_path())
    }

    /// Same as [`Config::load`] against an explicit config file path.
    pub fn load_or_default(path: &str) -> Result<Self, AppError> {
        let mut config = if Path::new(path).exists() {
            Self::load_from_path(path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(snapshot) = std::env::var(env_vars::SNAPSHOT) {
            self.snapshot_path = Some(snapshot);
        }

        if let Ok(season) = std::env::var(env_vars::SEASON) {
            match season.trim().parse::<i32>() {
                Ok(season) => self.season = Some(season),
                Err(_) => warn!(
                    "Ignoring {}={:?}: not a season number",
                    env_vars::SEASON,
                    season
                ),
            }
        }

        if let Ok(log_file_path) = std::env::var(env_vars::LOG_FILE) {
            self.log_file_path = Some(log_file_path);
        }
    }

    /// Validates the configuration settings
    pub fn validate(&self) -> Result<(), AppError> {
        validate_config(&self.snapshot_path, self.season, &self.log_file_path)
    }

    /// Saves current configuration to the default config file location.
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to_path(&get_config_path())
    }

    pub fn get_config_path() -> String {
        paths::get_config_path()
    }

    pub fn get_log_dir_path() -> String {
        paths::get_log_dir_path()
    }

    /// Displays current configuration settings to stdout.
    ///
    /// # Notes
    /// - Shows config file location and current settings
    /// - Handles case when no config file exists
    pub fn display() -> Result<(), AppError> {
        let config_path = get_config_path();
        let log_dir = get_log_dir_path();

        if !Path::new(&config_path).exists() {
            println!("\nNo configuration file found at:");
            println!("{config_path}");
            return Ok(());
        }

        let config = Config::load()?;
        println!("\nCurrent Configuration");
        println!("────────────────────────────────────");
        println!("Config Location:");
        println!("{config_path}");
        println!("────────────────────────────────────");
        println!("Snapshot:");
        println!("{}", config.snapshot_path.as_deref().unwrap_or("(not set)"));
        println!("────────────────────────────────────");
        println!("Season:");
        match config.season {
            Some(season) => println!("{season}"),
            None => println!("(all seasons)"),
        }
        println!("────────────────────────────────────");
        println!("Log File Location:");
        if let Some(custom_path) = &config.log_file_path {
            println!("{custom_path}");
        } else {
            println!("{log_dir}/{LOG_FILE_NAME}");
            println!("(Default location)");
        }

        Ok(())
    }

    /// Saves configuration to a custom file path, creating the parent directory
    /// if it doesn't exist.
    ///
    /// # Errors
    /// * `AppError::Config` - If the provided path has no parent directory
    /// * `AppError::Io` - If there's an I/O error creating directories or writing the file
    /// * `AppError::TomlSerialize` - If there's an error serializing the configuration
    pub fn save_to_path(&self, path: &str) -> Result<(), AppError> {
        let config_dir = Path::new(path).parent().ok_or_else(|| {
            AppError::config_error(format!("Path '{path}' has no parent directory"))
        })?;

        if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
            std::fs::create_dir_all(config_dir)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads configuration from a custom file path without env overrides.
    pub fn load_from_path(path: &str) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::tempdir;

    fn clear_env() {
        // SAFETY: env-mutating tests run under #[serial]
        unsafe {
            std::env::remove_var(env_vars::SNAPSHOT);
            std::env::remove_var(env_vars::SEASON);
            std::env::remove_var(env_vars::LOG_FILE);
        }
    }

    #[test]
    fn test_config_load_existing_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_content = r#"
snapshot_path = "/data/2024.json"
season = 2024
log_file_path = "/custom/log/path"
"#;
        std::fs::write(&config_path, config_content).unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy()).unwrap();

        assert_eq!(config.snapshot_path.as_deref(), Some("/data/2024.json"));
        assert_eq!(config.season, Some(2024));
        assert_eq!(config.log_file_path, Some("/custom/log/path".to_string()));
    }

    #[test]
    fn test_config_load_empty_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = Config::load_from_path(&config_path.to_string_lossy()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_save_creates_directory() {
        let temp_dir = tempdir().unwrap();
        let config_dir = temp_dir.path().join("frc_records");
        let config_path = config_dir.join("config.toml");
        let config = Config {
            snapshot_path: Some("/data/2024.json".to_string()),
            season: Some(2024),
            log_file_path: None,
        };

        config.save_to_path(&config_path.to_string_lossy()).unwrap();

        assert!(config_dir.exists());
        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("season = 2024"), "Content: {content}");
        assert!(!content.contains("log_file_path"), "Content: {content}");
    }

    #[test]
    fn test_config_save_and_load_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        let config_path_str = config_path.to_string_lossy();
        let original = Config {
            snapshot_path: Some("/data/2024.json".to_string()),
            season: Some(2019),
            log_file_path: Some("/custom/log/path".to_string()),
        };

        original.save_to_path(&config_path_str).unwrap();
        let loaded = Config::load_from_path(&config_path_str).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_config_invalid_toml() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "season = \"not a number").unwrap();

        let result = Config::load_from_path(&config_path.to_string_lossy());
        assert!(matches!(result, Err(AppError::TomlDeserialize(_))));
    }

    #[test]
    #[serial]
    fn test_missing_file_yields_defaults() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("absent.toml");

        let config = Config::load_or_default(&config_path.to_string_lossy()).unwrap();

        assert_eq!(config, Config::default());
        assert!(!config_path.exists());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file_values() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "season = 2019\nsnapshot_path = \"/a.json\"\n").unwrap();

        unsafe {
            std::env::set_var(env_vars::SEASON, "2024");
            std::env::set_var(env_vars::SNAPSHOT, "/b.json");
        }
        let config = Config::load_or_default(&config_path.to_string_lossy());
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.season, Some(2024));
        assert_eq!(config.snapshot_path.as_deref(), Some("/b.json"));
    }

    #[test]
    #[serial]
    fn test_unparseable_season_env_is_ignored() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "season = 2019\n").unwrap();

        unsafe {
            std::env::set_var(env_vars::SEASON, "next year");
        }
        let config = Config::load_or_default(&config_path.to_string_lossy());
        clear_env();

        assert_eq!(config.unwrap().season, Some(2019));
    }

    #[test]
    #[serial]
    fn test_out_of_range_season_fails_validation() {
        clear_env();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "season = 1850\n").unwrap();

        let err = Config::load_or_default(&config_path.to_string_lossy()).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
