use super::attributes::{AttrValue, AttributeStore};
use super::event::Event;
use super::location::Location;
use super::record::Record;
use crate::constants::TEAM_KEY_PREFIX;
use crate::provider::TeamInfo;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::debug;

/// Which slice of a team's history a record query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordScope<'a> {
    All,
    /// Events whose key starts with this season
    Year(i32),
    Event(&'a str),
}

#[derive(Debug, Clone)]
pub struct Team {
    team_number: u32,
    key: String,
    name: Option<String>,
    nickname: Option<String>,
    location: Location,
    event_wlt: BTreeMap<String, Record>,
    event_wins: BTreeMap<i32, Vec<String>>,
    attrs: AttributeStore,
}

impl Team {
    /// The key a team is known by across the service ("frc254").
    pub fn key_for(team_number: u32) -> String {
        format!("{TEAM_KEY_PREFIX}{team_number}")
    }

    pub fn new(team_number: u32) -> Self {
        Self {
            team_number,
            key: Team::key_for(team_number),
            name: None,
            nickname: None,
            location: Location::default(),
            event_wlt: BTreeMap::new(),
            event_wins: BTreeMap::new(),
            attrs: AttributeStore::new(),
        }
    }

    pub fn from_info(info: &TeamInfo) -> Self {
        let mut team = Team::new(info.team_number);
        team.load_info(info);
        team
    }

    /// Overwrites the descriptive fields. Records and attributes are kept.
    pub fn load_info(&mut self, info: &TeamInfo) {
        self.name = info.name.clone();
        self.nickname = info.nickname.clone();
        self.location = Location::new(
            info.city.clone(),
            info.state_prov.clone(),
            info.country.clone(),
        );
    }

    /// Rebuilds this team's record for `event` from its finished matches.
    ///
    /// The previous entry for the event is replaced, never accumulated. When the
    /// event's winning alliance includes this team the event key is appended to
    /// the season's win list, even if it is already there.
    pub fn recompute_event_record(&mut self, event: &Event) {
        let record = event
            .finished_matches()
            .filter_map(|game| game.outcome_for(&self.key))
            .fold(Record::default(), |mut record, outcome| {
                record.tally(outcome);
                record
            });
        self.event_wlt.insert(event.key().to_string(), record);

        let won = event
            .winning_alliance()
            .is_some_and(|alliance| alliance.contains(&self.key));
        if won {
            self.event_wins
                .entry(event.year())
                .or_default()
                .push(event.key().to_string());
        }

        debug!(
            "Team {} at {}: {}{}",
            self.key,
            event.key(),
            record,
            if won { " (event winner)" } else { "" }
        );
    }

    pub fn total_record(&self, scope: RecordScope<'_>) -> Record {
        match scope {
            RecordScope::All => self.event_wlt.values().sum(),
            RecordScope::Year(year) => {
                let prefix = year.to_string();
                self.event_wlt
                    .iter()
                    .filter(|(key, _)| key.get(..4) == Some(prefix.as_str()))
                    .map(|(_, record)| *record)
                    .sum()
            }
            RecordScope::Event(key) => self.event_record(key),
        }
    }

    /// Zero record when the team has not been scored at `event_key`.
    pub fn event_record(&self, event_key: &str) -> Record {
        self.event_wlt.get(event_key).copied().unwrap_or_default()
    }

    pub fn event_records(&self) -> &BTreeMap<String, Record> {
        &self.event_wlt
    }

    /// Events won in `year`, in the order they were recorded. May contain repeats
    /// when the same event was recomputed more than once.
    pub fn event_wins(&self, year: i32) -> &[String] {
        self.event_wins
            .get(&year)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn distinct_event_wins(&self, year: i32) -> BTreeSet<&str> {
        self.event_wins(year).iter().map(String::as_str).collect()
    }

    pub fn team_number(&self) -> u32 {
        self.team_number
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.set(key, value);
    }

    pub fn attrs(&self) -> &AttributeStore {
        &self.attrs
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.nickname {
            Some(nickname) => write!(f, "{} {}", self.team_number, nickname),
            None => write!(f, "{}", self.team_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::SnapshotProvider;
    use crate::testing_utils::TestDataBuilder;
    use chrono::NaiveDate;

    fn after_event() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()
    }

    fn refreshed_event() -> (Event, crate::aggregation::TeamDirectory) {
        let provider = SnapshotProvider::new(TestDataBuilder::championship_snapshot());
        let mut teams = TestDataBuilder::team_directory(&[1, 2, 3, 4]);
        let mut event = Event::new("2024cala").unwrap();
        event
            .refresh_as_of(&provider, &mut teams, after_event())
            .unwrap();
        (event, teams)
    }

    #[test]
    fn test_key_uses_prefix() {
        let team = Team::new(254);
        assert_eq!(team.key(), "frc254");
        assert_eq!(team.team_number(), 254);
    }

    #[test]
    fn test_load_info_keeps_records() {
        let (_, teams) = refreshed_event();
        let mut team = teams.get("frc1").unwrap().clone();

        team.load_info(&TeamInfo {
            team_number: 1,
            nickname: Some("The Juggernauts".to_string()),
            city: Some("Pontiac".to_string()),
            state_prov: Some("Michigan".to_string()),
            country: Some("USA".to_string()),
            ..Default::default()
        });

        assert_eq!(team.nickname(), Some("The Juggernauts"));
        assert_eq!(team.location().state(), Some("Michigan"));
        assert_eq!(team.event_record("2024cala"), Record::new(1, 0, 0));
        assert_eq!(team.to_string(), "1 The Juggernauts");
    }

    #[test]
    fn test_winner_and_loser_records() {
        let (_, teams) = refreshed_event();

        assert_eq!(teams.get("frc1").unwrap().event_record("2024cala"), Record::new(1, 0, 0));
        assert_eq!(teams.get("frc2").unwrap().event_record("2024cala"), Record::new(1, 0, 0));
        assert_eq!(teams.get("frc3").unwrap().event_record("2024cala"), Record::new(0, 1, 0));
    }

    #[test]
    fn test_absent_team_gets_zero_record() {
        let (_, teams) = refreshed_event();
        // frc4 is rostered but never played a finished match
        assert_eq!(teams.get("frc4").unwrap().event_record("2024cala"), Record::default());
        assert_eq!(
            teams.get("frc4").unwrap().total_record(RecordScope::Event("2024cala")),
            Record::default()
        );
    }

    #[test]
    fn test_recompute_is_idempotent_for_records_but_appends_wins() {
        let (event, mut teams) = refreshed_event();
        let team = teams.get_mut("frc1").unwrap();
        let before = team.event_record("2024cala");

        team.recompute_event_record(&event);

        assert_eq!(team.event_record("2024cala"), before);
        assert_eq!(team.event_wins(2024), ["2024cala", "2024cala"]);
        assert_eq!(team.distinct_event_wins(2024).len(), 1);
        assert!(team.event_wins(2023).is_empty());
    }

    #[test]
    fn test_total_record_scopes() {
        let mut team = Team::new(1);
        team.event_wlt.insert("2023casj".to_string(), Record::new(5, 3, 1));
        team.event_wlt.insert("2024cala".to_string(), Record::new(8, 2, 0));
        team.event_wlt.insert("2024casf".to_string(), Record::new(4, 4, 1));

        assert_eq!(team.total_record(RecordScope::All), Record::new(17, 9, 2));
        assert_eq!(team.total_record(RecordScope::Year(2024)), Record::new(12, 6, 1));
        assert_eq!(team.total_record(RecordScope::Year(2023)), Record::new(5, 3, 1));
        assert_eq!(team.total_record(RecordScope::Year(2019)), Record::default());
        assert_eq!(team.total_record(RecordScope::Event("2024casf")), Record::new(4, 4, 1));
        assert_eq!(team.total_record(RecordScope::Event("2022xxxx")), Record::default());
    }
}
