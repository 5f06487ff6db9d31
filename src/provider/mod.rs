//! Source of team, event and match data.
//!
//! The aggregation core never talks to the statistics service directly; it asks a
//! [`ResultsProvider`] for payloads and tolerates whatever fields are missing.

pub mod snapshot;
pub mod wire;

pub use snapshot::{EventSnapshot, Snapshot, SnapshotProvider, SnapshotTeam};
pub use wire::{AllianceInfo, EventInfo, MatchAllianceInfo, MatchAlliances, MatchInfo, TeamInfo};

use crate::error::AppError;
use std::collections::BTreeSet;

/// Blocking access to competition data.
///
/// Implementations return `AppError::EventNotFound` for keys they don't know and
/// `AppError::ProviderUnavailable` when the data exists but cannot be retrieved.
pub trait ResultsProvider {
    /// All teams, or only those that competed in `year` when given.
    fn list_teams(&self, year: Option<i32>) -> Result<Vec<TeamInfo>, AppError>;

    fn list_event_keys(&self, year: i32) -> Result<Vec<String>, AppError>;

    fn get_event_meta(&self, event_key: &str) -> Result<EventInfo, AppError>;

    /// `Ok(None)` means the event has published no alliance data.
    fn get_event_alliances(&self, event_key: &str) -> Result<Option<Vec<AllianceInfo>>, AppError>;

    fn get_event_matches(&self, event_key: &str) -> Result<Vec<MatchInfo>, AppError>;

    fn get_event_team_keys(&self, event_key: &str) -> Result<BTreeSet<String>, AppError>;
}

impl<P: ResultsProvider + ?Sized> ResultsProvider for &P {
    fn list_teams(&self, year: Option<i32>) -> Result<Vec<TeamInfo>, AppError> {
        (**self).list_teams(year)
    }

    fn list_event_keys(&self, year: i32) -> Result<Vec<String>, AppError> {
        (**self).list_event_keys(year)
    }

    fn get_event_meta(&self, event_key: &str) -> Result<EventInfo, AppError> {
        (**self).get_event_meta(event_key)
    }

    fn get_event_alliances(&self, event_key: &str) -> Result<Option<Vec<AllianceInfo>>, AppError> {
        (**self).get_event_alliances(event_key)
    }

    fn get_event_matches(&self, event_key: &str) -> Result<Vec<MatchInfo>, AppError> {
        (**self).get_event_matches(event_key)
    }

    fn get_event_team_keys(&self, event_key: &str) -> Result<BTreeSet<String>, AppError> {
        (**self).get_event_team_keys(event_key)
    }
}
