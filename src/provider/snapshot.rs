use super::ResultsProvider;
use super::wire::{AllianceInfo, EventInfo, MatchInfo, TeamInfo};
use crate::error::AppError;
use crate::models::year_from_event_key;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::{debug, info};

/// A team as stored in a snapshot file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SnapshotTeam {
    #[serde(flatten)]
    pub info: TeamInfo,
    /// Seasons the team competed in. Empty means every season.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub years: Vec<i32>,
}

impl SnapshotTeam {
    pub fn competed_in(&self, year: i32) -> bool {
        self.years.is_empty() || self.years.contains(&year)
    }
}

/// Everything known about one event at the time the snapshot was taken.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EventSnapshot {
    pub event: EventInfo,
    /// `None` when the event published no alliances. Null entries are skipped.
    #[serde(default)]
    pub alliances: Option<Vec<Option<AllianceInfo>>>,
    /// Marks alliance data as unretrievable, as a live service outage would.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub alliances_unavailable: bool,
    #[serde(default)]
    pub matches: Vec<MatchInfo>,
    /// Rostered team keys. When empty the roster is taken from the match alliances.
    #[serde(default)]
    pub teams: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub teams: Vec<SnapshotTeam>,
    #[serde(default)]
    pub events: Vec<EventSnapshot>,
}

/// In-memory provider answering from a previously exported [`Snapshot`].
#[derive(Debug, Clone, Default)]
pub struct SnapshotProvider {
    teams: Vec<SnapshotTeam>,
    events: BTreeMap<String, EventSnapshot>,
}

impl SnapshotProvider {
    pub fn new(snapshot: Snapshot) -> Self {
        let events = snapshot
            .events
            .into_iter()
            .map(|event| (event.event.key.clone(), event))
            .collect();
        Self {
            teams: snapshot.teams,
            events,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        Ok(Self::new(snapshot))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let provider = Self::from_json_str(&content)?;
        info!(
            "Loaded snapshot from {}: {} teams, {} events",
            path.display(),
            provider.teams.len(),
            provider.events.len()
        );
        Ok(provider)
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    fn event(&self, event_key: &str) -> Result<&EventSnapshot, AppError> {
        self.events
            .get(event_key)
            .ok_or_else(|| AppError::event_not_found(event_key))
    }
}

impl ResultsProvider for SnapshotProvider {
    fn list_teams(&self, year: Option<i32>) -> Result<Vec<TeamInfo>, AppError> {
        let teams: Vec<TeamInfo> = self
            .teams
            .iter()
            .filter(|team| year.is_none_or(|year| team.competed_in(year)))
            .map(|team| team.info.clone())
            .collect();
        debug!("Snapshot lists {} teams for {:?}", teams.len(), year);
        Ok(teams)
    }

    fn list_event_keys(&self, year: i32) -> Result<Vec<String>, AppError> {
        Ok(self
            .events
            .iter()
            .filter(|(key, snapshot)| {
                snapshot
                    .event
                    .year
                    .or_else(|| year_from_event_key(key).ok())
                    == Some(year)
            })
            .map(|(key, _)| key.clone())
            .collect())
    }

    fn get_event_meta(&self, event_key: &str) -> Result<EventInfo, AppError> {
        Ok(self.event(event_key)?.event.clone())
    }

    fn get_event_alliances(&self, event_key: &str) -> Result<Option<Vec<AllianceInfo>>, AppError> {
        let snapshot = self.event(event_key)?;
        if snapshot.alliances_unavailable {
            return Err(AppError::provider_unavailable(
                format!("alliances for {event_key}"),
                "marked unavailable in snapshot",
            ));
        }
        Ok(snapshot
            .alliances
            .as_ref()
            .map(|alliances| alliances.iter().flatten().cloned().collect()))
    }

    fn get_event_matches(&self, event_key: &str) -> Result<Vec<MatchInfo>, AppError> {
        Ok(self.event(event_key)?.matches.clone())
    }

    fn get_event_team_keys(&self, event_key: &str) -> Result<BTreeSet<String>, AppError> {
        let snapshot = self.event(event_key)?;
        if !snapshot.teams.is_empty() {
            return Ok(snapshot.teams.iter().cloned().collect());
        }

        Ok(snapshot
            .matches
            .iter()
            .filter_map(|game| game.alliances.as_ref())
            .filter_map(|alliances| alliances.team_keys())
            .flat_map(|(red, blue)| red.iter().chain(blue))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_unknown_event_is_not_found() {
        let provider = SnapshotProvider::default();
        let err = provider.get_event_meta("2024zzzz").unwrap_err();
        assert!(err.is_not_found());
        assert!(err.is_provider_failure());
    }

    #[test]
    fn test_list_teams_by_year() {
        let json = r#"{
            "teams": [
                { "team_number": 1, "nickname": "The Juggernauts" },
                { "team_number": 254, "years": [2023, 2024] },
                { "team_number": 9999, "years": [2019] }
            ]
        }"#;
        let provider = SnapshotProvider::from_json_str(json).unwrap();

        let numbers = |year| -> Vec<u32> {
            provider
                .list_teams(year)
                .unwrap()
                .iter()
                .map(|team| team.team_number)
                .collect()
        };

        assert_eq!(numbers(None), vec![1, 254, 9999]);
        assert_eq!(numbers(Some(2024)), vec![1, 254]);
        assert_eq!(numbers(Some(2019)), vec![1, 9999]);
    }

    #[test]
    fn test_list_event_keys_uses_year() {
        let mut snapshot = TestDataBuilder::championship_snapshot();
        snapshot.events.push(EventSnapshot {
            event: TestDataBuilder::event_info("2023casj", "2023-03-01", "2023-03-04"),
            ..Default::default()
        });
        let provider = SnapshotProvider::new(snapshot);

        assert_eq!(provider.list_event_keys(2024).unwrap(), vec!["2024cala"]);
        assert_eq!(provider.list_event_keys(2023).unwrap(), vec!["2023casj"]);
        assert!(provider.list_event_keys(2010).unwrap().is_empty());
    }

    #[test]
    fn test_null_alliance_entries_are_skipped() {
        let json = r#"{
            "events": [{
                "event": { "key": "2024cala" },
                "alliances": [null, { "picks": ["frc1", "frc2"], "status": { "status": "won" } }]
            }]
        }"#;
        let provider = SnapshotProvider::from_json_str(json).unwrap();

        let alliances = provider.get_event_alliances("2024cala").unwrap().unwrap();
        assert_eq!(alliances.len(), 1);
        assert_eq!(alliances[0].picks, vec!["frc1", "frc2"]);
    }

    #[test]
    fn test_unavailable_alliances_fail() {
        let mut snapshot = TestDataBuilder::championship_snapshot();
        snapshot.events[0].alliances_unavailable = true;
        let provider = SnapshotProvider::new(snapshot);

        let err = provider.get_event_alliances("2024cala").unwrap_err();
        assert!(matches!(err, AppError::ProviderUnavailable { .. }));
    }

    #[test]
    fn test_roster_falls_back_to_match_alliances() {
        let mut snapshot = TestDataBuilder::championship_snapshot();
        snapshot.events[0].teams.clear();
        let provider = SnapshotProvider::new(snapshot);

        let roster = provider.get_event_team_keys("2024cala").unwrap();
        assert!(roster.contains("frc1"));
        assert!(roster.contains("frc3"));
    }

    #[test]
    fn test_malformed_snapshot_is_parse_error() {
        let err = SnapshotProvider::from_json_str("{ \"teams\": 5 }").unwrap_err();
        assert!(matches!(err, AppError::SnapshotParse(_)));
    }
}
