use crate::constants::paths::{APP_DIR_NAME, CONFIG_FILE_NAME, LOG_DIR_NAME};
use std::path::{Path, PathBuf};

fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| Path::new(".").to_path_buf())
        .join(APP_DIR_NAME)
}

/// Returns the platform-specific path for the config file.
///
/// # Notes
/// - Uses platform-specific config directory (e.g., ~/.config on Linux)
/// - Falls back to current directory if config directory is unavailable
pub fn get_config_path() -> String {
    app_dir()
        .join(CONFIG_FILE_NAME)
        .to_string_lossy()
        .to_string()
}

/// Returns the platform-specific path for the log directory.
pub fn get_log_dir_path() -> String {
    app_dir().join(LOG_DIR_NAME).to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_share_app_dir() {
        let config_path = PathBuf::from(get_config_path());
        let log_dir = PathBuf::from(get_log_dir_path());

        assert!(config_path.ends_with("frc_records/config.toml"));
        assert!(log_dir.ends_with("frc_records/logs"));
        assert_eq!(config_path.parent(), log_dir.parent());
    }
}
