use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to parse snapshot data: {0}")]
    SnapshotParse(#[from] serde_json::Error),

    // Results provider failures
    #[error("Event not found: {key}")]
    EventNotFound { key: String },

    #[error("Team not found: {key}")]
    TeamNotFound { key: String },

    #[error("Invalid event key '{key}': {message}")]
    InvalidEventKey { key: String, message: String },

    #[error("Results provider could not supply {resource}: {message}")]
    ProviderUnavailable { resource: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Date/time parsing error: {0}")]
    DateTimeParse(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a date/time parsing error with context
    pub fn datetime_parse_error(msg: impl Into<String>) -> Self {
        Self::DateTimeParse(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    pub fn event_not_found(key: impl Into<String>) -> Self {
        Self::EventNotFound { key: key.into() }
    }

    pub fn team_not_found(key: impl Into<String>) -> Self {
        Self::TeamNotFound { key: key.into() }
    }

    /// Create an invalid event key error
    pub fn invalid_event_key(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEventKey {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a provider failure for the named resource (e.g. "alliances for 2024cala")
    pub fn provider_unavailable(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Check if error indicates a missing team or event rather than a technical failure
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::EventNotFound { .. } | AppError::TeamNotFound { .. }
        )
    }

    /// Check if error originated in the results provider
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            AppError::ProviderUnavailable { .. }
                | AppError::EventNotFound { .. }
                | AppError::SnapshotParse(_)
        )
    }
}
