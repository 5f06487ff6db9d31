//! Application-wide constants
//!
//! Keeps the program-defined boundaries (official event types, season range,
//! progress logging cadence) in one place.

/// Highest `event_type` ordinal that still counts as an official program event.
/// Everything above it is an offseason, preseason or exhibition event.
pub const OFFICIAL_EVENT_TYPE_MAX: i32 = 6;

/// Bulk team loading logs progress every time this percentage is crossed.
pub const PROGRESS_LOG_STEP_PERCENT: usize = 10;

/// Prefix that turns a team number into a team key (`254` -> `frc254`).
pub const TEAM_KEY_PREFIX: &str = "frc";

/// Default number of teams returned by attribute rankings.
pub const DEFAULT_RANKING_LIMIT: usize = 10;

/// Season bounds accepted by configuration validation.
pub mod season {
    /// First season with published match results.
    pub const FIRST_SEASON: i32 = 1992;

    /// Upper bound used to reject obviously mistyped seasons.
    pub const LAST_SUPPORTED_SEASON: i32 = 2100;
}

/// File and directory names under the platform config directory
pub mod paths {
    pub const APP_DIR_NAME: &str = "frc_records";
    pub const CONFIG_FILE_NAME: &str = "config.toml";
    pub const LOG_DIR_NAME: &str = "logs";
    pub const LOG_FILE_NAME: &str = "frc_records.log";
}

/// Environment variables that override config file values
pub mod env_vars {
    pub const SNAPSHOT: &str = "FRC_RECORDS_SNAPSHOT";
    pub const SEASON: &str = "FRC_RECORDS_SEASON";
    pub const LOG_FILE: &str = "FRC_RECORDS_LOG_FILE";
}
