use super::directory::TeamDirectory;
use super::filters::{SortOrder, TeamFilter, rank_by_attr};
use crate::constants::PROGRESS_LOG_STEP_PERCENT;
use crate::error::AppError;
use crate::models::{AttrValue, Event, Team};
use crate::provider::ResultsProvider;
use chrono::{Local, NaiveDate};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

/// Indices after which bulk-load progress is reported: every step boundary
/// (rounded down) plus the final index.
pub fn progress_checkpoints(total: usize) -> BTreeSet<usize> {
    let steps = 100 / PROGRESS_LOG_STEP_PERCENT;
    let mut checkpoints: BTreeSet<usize> = (0..=steps)
        .map(|step| step * total * PROGRESS_LOG_STEP_PERCENT / 100)
        .collect();
    if let Some(last) = total.checked_sub(1) {
        checkpoints.insert(last);
    }
    checkpoints
}

/// Owns the team collection for a session and keeps it in step with events.
///
/// Teams are loaded once up front. Every event fetched through [`Orchestrator::get_event`]
/// is cached and, on each call, refreshed in place; the refresh recomputes the
/// records of its rostered teams.
pub struct Orchestrator<P> {
    provider: P,
    season: Option<i32>,
    teams: TeamDirectory,
    events: BTreeMap<String, Event>,
    today: Option<NaiveDate>,
}

impl<P: ResultsProvider> Orchestrator<P> {
    /// Creates an orchestrator and bulk-loads every team, or only the teams of
    /// `season` when given.
    pub fn new(provider: P, season: Option<i32>) -> Result<Self, AppError> {
        let mut orchestrator = Self {
            provider,
            season,
            teams: TeamDirectory::new(),
            events: BTreeMap::new(),
            today: None,
        };
        orchestrator.load_all_teams()?;
        Ok(orchestrator)
    }

    /// Pins the date used for started/finished checks.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn season(&self) -> Option<i32> {
        self.season
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// (Re)reads the team list. Known teams get their descriptive fields updated
    /// and keep their records; new teams are appended.
    #[instrument(skip(self), fields(season = ?self.season))]
    pub fn load_all_teams(&mut self) -> Result<usize, AppError> {
        let infos = self.provider.list_teams(self.season)?;
        let total = infos.len();
        let checkpoints = progress_checkpoints(total);

        for (i, info) in infos.iter().enumerate() {
            let key = Team::key_for(info.team_number);
            match self.teams.get_mut(&key) {
                Some(team) => team.load_info(info),
                None => {
                    self.teams.insert(Team::from_info(info));
                }
            }

            if checkpoints.contains(&i) {
                info!("{}% teams loaded", (i + 1) * 100 / total);
            }
        }

        debug!("Team directory holds {} teams", self.teams.len());
        Ok(total)
    }

    pub fn get_all_teams(&self) -> &TeamDirectory {
        &self.teams
    }

    pub fn team(&self, key: &str) -> Option<&Team> {
        self.teams.get(key)
    }

    pub fn team_by_number(&self, team_number: u32) -> Option<&Team> {
        self.teams.by_number(team_number)
    }

    pub fn team_mut(&mut self, key: &str) -> Option<&mut Team> {
        self.teams.get_mut(key)
    }

    pub fn teams_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.iter_mut()
    }

    /// Fetches or refreshes `event_key` and recomputes its rostered teams.
    ///
    /// A new event only enters the cache once its first refresh succeeds.
    #[instrument(skip(self))]
    pub fn get_event(&mut self, event_key: &str) -> Result<&Event, AppError> {
        let today = self.today();
        match self.events.get_mut(event_key) {
            Some(event) => event.refresh_as_of(&self.provider, &mut self.teams, today)?,
            None => {
                let mut event = Event::new(event_key)?;
                event.refresh_as_of(&self.provider, &mut self.teams, today)?;
                self.events.insert(event_key.to_string(), event);
            }
        }
        self.event(event_key)
            .ok_or_else(|| AppError::event_not_found(event_key))
    }

    /// Fetches every event of `year`. With `current_only`, returns only the ones
    /// in progress today; all of them are still refreshed.
    #[instrument(skip(self))]
    pub fn get_events(&mut self, year: i32, current_only: bool) -> Result<Vec<&Event>, AppError> {
        let keys = self.provider.list_event_keys(year)?;
        info!("Loading {} events for {}", keys.len(), year);
        for key in &keys {
            self.get_event(key)?;
        }

        let today = self.today();
        Ok(keys
            .iter()
            .filter_map(|key| self.events.get(key))
            .filter(|event| !current_only || event.is_ongoing_on(today))
            .collect())
    }

    /// A previously fetched event, without contacting the provider.
    pub fn event(&self, event_key: &str) -> Option<&Event> {
        self.events.get(event_key)
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    /// Teams matching `filter`, in directory order. An event criterion asks the
    /// provider for that event's roster.
    #[instrument(skip(self))]
    pub fn filter_team_list(&self, filter: &TeamFilter) -> Result<Vec<&Team>, AppError> {
        let roster = match &filter.event_key {
            Some(event_key) => Some(self.provider.get_event_team_keys(event_key)?),
            None => None,
        };
        let teams = filter.apply(&self.teams, roster.as_ref());
        debug!("Filter kept {} of {} teams", teams.len(), self.teams.len());
        Ok(teams)
    }

    /// Sets `key` to `value` on every team, replacing what was there.
    pub fn init_team_attribute(&mut self, key: &str, value: impl Into<AttrValue>) {
        let value = value.into();
        for team in self.teams.iter_mut() {
            team.set_attr(key, value.clone());
        }
    }

    /// Top `n` teams by a numeric attribute. Teams lacking it sort last.
    pub fn get_ranked_team_list_by_attr(&self, key: &str, order: SortOrder, n: usize) -> Vec<&Team> {
        rank_by_attr(&self.teams, key, order, n)
    }
}
