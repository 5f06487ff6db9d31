use super::alliance::Alliance;
use super::attributes::{AttrValue, AttributeStore};
use super::location::Location;
use super::match_record::Match;
use super::team::Team;
use crate::aggregation::TeamDirectory;
use crate::constants::OFFICIAL_EVENT_TYPE_MAX;
use crate::error::AppError;
use crate::provider::{EventInfo, ResultsProvider};
use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, warn};

/// Formats a date the way the service publishes event dates, so the two compare lexically.
fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Reads the four-digit season prefix of an event key ("2024cala" -> 2024).
pub fn year_from_event_key(key: &str) -> Result<i32, AppError> {
    let prefix = key
        .get(..4)
        .filter(|prefix| prefix.chars().all(|c| c.is_ascii_digit()))
        .ok_or_else(|| AppError::invalid_event_key(key, "expected a four-digit year prefix"))?;
    prefix
        .parse::<i32>()
        .map_err(|e| AppError::invalid_event_key(key, e.to_string()))
}

#[derive(Debug, Clone)]
pub struct Event {
    key: String,
    year: i32,
    name: Option<String>,
    event_code: Option<String>,
    event_type: Option<i32>,
    event_type_string: Option<String>,
    location: Location,
    location_name: Option<String>,
    start_date: Option<String>,
    end_date: Option<String>,
    week: Option<u32>,
    short_name: Option<String>,
    playoff_type: Option<i32>,
    playoff_type_string: Option<String>,
    matches: BTreeMap<String, Match>,
    teams: BTreeSet<String>,
    alliances: Vec<Alliance>,
    attrs: AttributeStore,
}

impl Event {
    /// Creates an empty event. The key must start with a four-digit season.
    pub fn new(key: impl Into<String>) -> Result<Self, AppError> {
        let key = key.into();
        let year = year_from_event_key(&key)?;
        Ok(Self {
            key,
            year,
            name: None,
            event_code: None,
            event_type: None,
            event_type_string: None,
            location: Location::default(),
            location_name: None,
            start_date: None,
            end_date: None,
            week: None,
            short_name: None,
            playoff_type: None,
            playoff_type_string: None,
            matches: BTreeMap::new(),
            teams: BTreeSet::new(),
            alliances: Vec::new(),
            attrs: AttributeStore::new(),
        })
    }

    /// Re-pulls everything about this event from `provider` and recomputes the
    /// record of every rostered team found in `teams`.
    pub fn refresh<P>(&mut self, provider: &P, teams: &mut TeamDirectory) -> Result<(), AppError>
    where
        P: ResultsProvider + ?Sized,
    {
        self.refresh_as_of(provider, teams, Local::now().date_naive())
    }

    /// Same as [`Event::refresh`] with an explicit "today" for the finished check.
    ///
    /// Steps, in order: metadata, alliances (finished events only), matches merged by
    /// key, roster, then per-team recomputation. A failure to fetch alliances is
    /// logged and treated as "no alliances"; every other provider failure aborts the
    /// refresh and is returned.
    pub fn refresh_as_of<P>(
        &mut self,
        provider: &P,
        teams: &mut TeamDirectory,
        today: NaiveDate,
    ) -> Result<(), AppError>
    where
        P: ResultsProvider + ?Sized,
    {
        let info = provider.get_event_meta(&self.key)?;
        self.apply_info(&info);

        if self.has_finished_on(today) {
            self.update_alliances(provider);
        } else {
            self.alliances.clear();
        }

        self.update_matches(provider)?;
        self.teams = provider.get_event_team_keys(&self.key)?;

        let event: &Event = self;
        let mut recomputed = 0;
        for team_key in &event.teams {
            if let Some(team) = teams.get_mut(team_key) {
                team.recompute_event_record(event);
                recomputed += 1;
            }
        }

        info!(
            "Refreshed event {}: {} matches, {} rostered teams, {} records recomputed, {} alliances",
            event.key,
            event.matches.len(),
            event.teams.len(),
            recomputed,
            event.alliances.len()
        );
        Ok(())
    }

    /// Overwrites the metadata fields from a provider payload.
    pub fn apply_info(&mut self, info: &EventInfo) {
        if !info.key.is_empty() && info.key != self.key {
            warn!(
                "Provider returned metadata keyed {} for event {}; keeping {}",
                info.key, self.key, self.key
            );
        }
        self.name = info.name.clone();
        self.event_code = info.event_code.clone();
        self.event_type = info.event_type;
        self.event_type_string = info.event_type_string.clone();
        self.location = Location::new(
            info.city.clone(),
            info.state_prov.clone(),
            info.country.clone(),
        );
        self.location_name = info.location_name.clone();
        self.start_date = info.start_date.clone();
        self.end_date = info.end_date.clone();
        if let Some(year) = info.year {
            self.year = year;
        }
        self.week = info.week;
        self.short_name = info.short_name.clone();
        self.playoff_type = info.playoff_type;
        self.playoff_type_string = info.playoff_type_string.clone();
    }

    fn update_alliances<P>(&mut self, provider: &P)
    where
        P: ResultsProvider + ?Sized,
    {
        self.alliances = match provider.get_event_alliances(&self.key) {
            Ok(Some(alliances)) => alliances
                .iter()
                .map(|info| Alliance::from_info(&self.key, info))
                .collect(),
            Ok(None) => {
                debug!("No alliance data published for {}", self.key);
                Vec::new()
            }
            Err(e) => {
                warn!("Treating alliances for {} as unavailable: {}", self.key, e);
                Vec::new()
            }
        };
    }

    fn update_matches<P>(&mut self, provider: &P) -> Result<(), AppError>
    where
        P: ResultsProvider + ?Sized,
    {
        for info in provider.get_event_matches(&self.key)? {
            self.matches
                .entry(info.key.clone())
                .and_modify(|existing| existing.update_from(&info))
                .or_insert_with(|| Match::from_info(&info));
        }
        Ok(())
    }

    /// The first alliance reporting a won status, in provider order.
    pub fn winning_alliance(&self) -> Option<&Alliance> {
        self.alliances.iter().find(|alliance| alliance.won_event())
    }

    pub fn has_started_on(&self, today: NaiveDate) -> bool {
        self.start_date
            .as_deref()
            .is_some_and(|start| iso_date(today).as_str() >= start)
    }

    /// Strict: an event whose last day is today has not finished yet.
    pub fn has_finished_on(&self, today: NaiveDate) -> bool {
        self.end_date
            .as_deref()
            .is_some_and(|end| iso_date(today).as_str() > end)
    }

    pub fn is_ongoing_on(&self, today: NaiveDate) -> bool {
        self.has_started_on(today) && !self.has_finished_on(today)
    }

    pub fn has_started(&self) -> bool {
        self.has_started_on(Local::now().date_naive())
    }

    pub fn has_finished(&self) -> bool {
        self.has_finished_on(Local::now().date_naive())
    }

    pub fn is_ongoing(&self) -> bool {
        self.is_ongoing_on(Local::now().date_naive())
    }

    pub fn is_official(&self) -> bool {
        self.event_type
            .is_some_and(|event_type| event_type <= OFFICIAL_EVENT_TYPE_MAX)
    }

    /// Rostered teams present in `teams`. Missing ones are reported as a warning.
    pub fn resolve_teams<'a>(&self, teams: &'a TeamDirectory) -> Vec<&'a Team> {
        let resolved: Vec<&Team> = self.teams.iter().filter_map(|key| teams.get(key)).collect();
        if resolved.len() != self.teams.len() {
            warn!(
                "Event {} couldn't resolve every rostered team: {}/{}",
                self.key,
                resolved.len(),
                self.teams.len()
            );
        }
        resolved
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn event_code(&self) -> Option<&str> {
        self.event_code.as_deref()
    }

    pub fn event_type(&self) -> Option<i32> {
        self.event_type
    }

    pub fn event_type_string(&self) -> Option<&str> {
        self.event_type_string.as_deref()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn location_name(&self) -> Option<&str> {
        self.location_name.as_deref()
    }

    pub fn start_date(&self) -> Option<&str> {
        self.start_date.as_deref()
    }

    pub fn end_date(&self) -> Option<&str> {
        self.end_date.as_deref()
    }

    pub fn week(&self) -> Option<u32> {
        self.week
    }

    pub fn short_name(&self) -> Option<&str> {
        self.short_name.as_deref()
    }

    pub fn playoff_type(&self) -> Option<i32> {
        self.playoff_type
    }

    pub fn playoff_type_string(&self) -> Option<&str> {
        self.playoff_type_string.as_deref()
    }

    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    pub fn match_by_key(&self, key: &str) -> Option<&Match> {
        self.matches.get(key)
    }

    pub fn match_by_key_mut(&mut self, key: &str) -> Option<&mut Match> {
        self.matches.get_mut(key)
    }

    pub fn finished_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values().filter(|game| game.is_finished())
    }

    /// Rostered team keys
    pub fn teams(&self) -> &BTreeSet<String> {
        &self.teams
    }

    pub fn alliances(&self) -> &[Alliance] {
        &self.alliances
    }

    pub fn attr(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.set(key, value);
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} ({})", self.key, name),
            None => f.write_str(&self.key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Record;
    use crate::provider::SnapshotProvider;
    use crate::testing_utils::TestDataBuilder;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn event_with_dates(start: &str, end: &str) -> Event {
        let mut event = Event::new("2024cala").unwrap();
        let mut info = TestDataBuilder::event_info("2024cala", start, end);
        info.event_type = Some(0);
        event.apply_info(&info);
        event
    }

    #[test]
    fn test_year_parsed_from_key() {
        assert_eq!(Event::new("2024cala").unwrap().year(), 2024);
        assert!(matches!(
            Event::new("cala"),
            Err(AppError::InvalidEventKey { .. })
        ));
        assert!(Event::new("20").is_err());
    }

    #[test]
    fn test_has_finished_is_strict() {
        let event = event_with_dates("2024-03-27", "2024-03-30");

        assert!(!event.has_finished_on(date("2024-03-30")));
        assert!(event.has_finished_on(date("2024-03-31")));
    }

    #[test]
    fn test_has_started_is_inclusive() {
        let event = event_with_dates("2024-03-27", "2024-03-30");

        assert!(!event.has_started_on(date("2024-03-26")));
        assert!(event.has_started_on(date("2024-03-27")));
        assert!(event.is_ongoing_on(date("2024-03-30")));
        assert!(!event.is_ongoing_on(date("2024-04-02")));
    }

    #[test]
    fn test_missing_dates_never_start_or_finish() {
        let event = Event::new("2024cala").unwrap();
        assert!(!event.has_started_on(date("2030-01-01")));
        assert!(!event.has_finished_on(date("2030-01-01")));
    }

    #[test]
    fn test_is_official_boundary() {
        let mut event = Event::new("2024cala").unwrap();
        assert!(!event.is_official());

        let mut info = TestDataBuilder::event_info("2024cala", "2024-03-27", "2024-03-30");
        info.event_type = Some(6);
        event.apply_info(&info);
        assert!(event.is_official());

        info.event_type = Some(99);
        event.apply_info(&info);
        assert!(!event.is_official());
    }

    #[test]
    fn test_unfinished_event_has_no_winning_alliance() {
        let snapshot = TestDataBuilder::championship_snapshot();
        let provider = SnapshotProvider::new(snapshot);
        let mut teams = TestDataBuilder::team_directory(&[1, 2, 3, 4]);
        let mut event = Event::new("2024cala").unwrap();

        event
            .refresh_as_of(&provider, &mut teams, date("2024-03-29"))
            .unwrap();

        assert!(event.alliances().is_empty());
        assert!(event.winning_alliance().is_none());
        // Matches still count while the event is running
        assert_eq!(
            teams.get("frc1").unwrap().event_record("2024cala"),
            Record::new(1, 0, 0)
        );
    }

    #[test]
    fn test_finished_event_detects_winning_alliance() {
        let provider = SnapshotProvider::new(TestDataBuilder::championship_snapshot());
        let mut teams = TestDataBuilder::team_directory(&[1, 2, 3, 4]);
        let mut event = Event::new("2024cala").unwrap();

        event
            .refresh_as_of(&provider, &mut teams, date("2024-04-15"))
            .unwrap();

        let winner = event.winning_alliance().unwrap();
        assert_eq!(winner.team_keys(), ["frc1", "frc2"]);
        assert_eq!(event.alliances().len(), 2);
        assert_eq!(teams.get("frc1").unwrap().event_wins(2024), ["2024cala"]);
        assert!(teams.get("frc3").unwrap().event_wins(2024).is_empty());
    }

    #[test]
    fn test_first_won_alliance_is_reported() {
        let mut snapshot = TestDataBuilder::championship_snapshot();
        snapshot.events[0].alliances = Some(vec![
            Some(TestDataBuilder::alliance(&["frc3", "frc4"], Some("won"))),
            Some(TestDataBuilder::alliance(&["frc1", "frc2"], Some("won"))),
        ]);
        let provider = SnapshotProvider::new(snapshot);
        let mut teams = TestDataBuilder::team_directory(&[1, 2, 3, 4]);
        let mut event = Event::new("2024cala").unwrap();

        event
            .refresh_as_of(&provider, &mut teams, date("2024-04-15"))
            .unwrap();

        assert_eq!(event.winning_alliance().unwrap().team_keys(), ["frc3", "frc4"]);
    }

    #[test]
    fn test_refresh_merges_matches_in_place() {
        let provider = SnapshotProvider::new(TestDataBuilder::championship_snapshot());
        let mut teams = TestDataBuilder::team_directory(&[1, 2, 3, 4]);
        let mut event = Event::new("2024cala").unwrap();
        let today = date("2024-04-15");

        event.refresh_as_of(&provider, &mut teams, today).unwrap();
        let match_key = event.matches().next().unwrap().key().to_string();
        event
            .match_by_key_mut(&match_key)
            .unwrap()
            .set_attr("reviewed", true);

        event.refresh_as_of(&provider, &mut teams, today).unwrap();

        assert_eq!(event.matches().count(), 2);
        assert_eq!(
            event.match_by_key(&match_key).unwrap().attr("reviewed"),
            Some(&AttrValue::Bool(true))
        );
    }

    #[test]
    fn test_resolve_teams_reports_partial_roster() {
        let provider = SnapshotProvider::new(TestDataBuilder::championship_snapshot());
        let mut teams = TestDataBuilder::team_directory(&[1, 2, 3]);
        let mut event = Event::new("2024cala").unwrap();
        event
            .refresh_as_of(&provider, &mut teams, date("2024-04-15"))
            .unwrap();

        let resolved = event.resolve_teams(&teams);
        assert_eq!(resolved.len(), 3);
        assert_eq!(event.teams().len(), 4);
    }
}
