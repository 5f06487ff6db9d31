use crate::constants::season::{FIRST_SEASON, LAST_SUPPORTED_SEASON};
use crate::error::AppError;
use std::path::Path;

/// Validates the configuration settings
///
/// # Validation Rules
/// - Snapshot path, if set, cannot be empty
/// - Season, if set, must be within the seasons the program has run
/// - Log file path, if set, cannot be empty
/// - Log file path parent directory must exist or be creatable
pub fn validate_config(
    snapshot_path: &Option<String>,
    season: Option<i32>,
    log_file_path: &Option<String>,
) -> Result<(), AppError> {
    if let Some(snapshot) = snapshot_path
        && snapshot.trim().is_empty()
    {
        return Err(AppError::config_error("Snapshot path cannot be empty"));
    }

    if let Some(season) = season
        && !(FIRST_SEASON..=LAST_SUPPORTED_SEASON).contains(&season)
    {
        return Err(AppError::config_error(format!(
            "Season {season} is outside {FIRST_SEASON}..={LAST_SUPPORTED_SEASON}"
        )));
    }

    if let Some(log_path) = log_file_path {
        if log_path.is_empty() {
            return Err(AppError::config_error("Log file path cannot be empty"));
        }

        if let Some(parent) = Path::new(log_path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config_error(format!(
                    "Cannot create log directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}
