use super::attributes::{AttrValue, AttributeStore};
use super::record::Outcome;
use super::team::Team;
use crate::aggregation::TeamDirectory;
use crate::provider::MatchInfo;
use tracing::{trace, warn};

/// Phase of the competition a match belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CompLevel {
    #[default]
    Qualification,
    EighthFinal,
    QuarterFinal,
    SemiFinal,
    Final,
    Other(String),
}

impl CompLevel {
    pub fn from_code(code: &str) -> Self {
        match code {
            "qm" => CompLevel::Qualification,
            "ef" => CompLevel::EighthFinal,
            "qf" => CompLevel::QuarterFinal,
            "sf" => CompLevel::SemiFinal,
            "f" => CompLevel::Final,
            other => CompLevel::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            CompLevel::Qualification => "qm",
            CompLevel::EighthFinal => "ef",
            CompLevel::QuarterFinal => "qf",
            CompLevel::SemiFinal => "sf",
            CompLevel::Final => "f",
            CompLevel::Other(code) => code,
        }
    }

    /// Elimination levels are the only ones that carry a set number.
    pub fn is_elimination(&self) -> bool {
        matches!(
            self,
            CompLevel::EighthFinal | CompLevel::QuarterFinal | CompLevel::SemiFinal | CompLevel::Final
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllianceColor {
    Red,
    Blue,
}

/// Declared winner of a match. `Unset` means no result has been reported yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WinningAlliance {
    Red,
    Blue,
    Tie,
    #[default]
    Unset,
}

impl WinningAlliance {
    /// The service reports a tie as an empty string.
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw {
            Some("red") => WinningAlliance::Red,
            Some("blue") => WinningAlliance::Blue,
            Some(_) => WinningAlliance::Tie,
            None => WinningAlliance::Unset,
        }
    }

    /// Outcome for a team that played on `color`. Anything but a red or blue
    /// win counts as a tie for both sides.
    pub fn outcome_for(self, color: AllianceColor) -> Outcome {
        match (self, color) {
            (WinningAlliance::Red, AllianceColor::Red)
            | (WinningAlliance::Blue, AllianceColor::Blue) => Outcome::Win,
            (WinningAlliance::Red, AllianceColor::Blue)
            | (WinningAlliance::Blue, AllianceColor::Red) => Outcome::Loss,
            (WinningAlliance::Tie | WinningAlliance::Unset, _) => Outcome::Tie,
        }
    }
}

/// Team objects behind a match's two rosters
#[derive(Debug)]
pub struct ResolvedAlliances<'a> {
    pub red: Vec<&'a Team>,
    pub blue: Vec<&'a Team>,
}

#[derive(Debug, Clone, Default)]
pub struct Match {
    key: String,
    event_key: String,
    comp_level: CompLevel,
    match_number: u32,
    set_number: Option<u32>,
    scheduled_time: Option<i64>,
    predicted_time: Option<i64>,
    finished: bool,
    winning_alliance: WinningAlliance,
    red_teams: Vec<String>,
    blue_teams: Vec<String>,
    red_score: Option<i32>,
    blue_score: Option<i32>,
    score_breakdown: Option<serde_json::Value>,
    attrs: AttributeStore,
}

impl Match {
    pub fn from_info(info: &MatchInfo) -> Self {
        let mut game = Match::default();
        game.update_from(info);
        game
    }

    /// Applies a provider payload on top of the current state.
    ///
    /// Fields the payload leaves out keep their previous values, so a match can be
    /// refreshed repeatedly as it moves from scheduled to finished. Once finished,
    /// a match stays finished. Attributes attached by callers are never touched.
    pub fn update_from(&mut self, info: &MatchInfo) {
        self.key = info.key.clone();
        if !info.event_key.is_empty() {
            self.event_key = info.event_key.clone();
        }
        if !info.comp_level.is_empty() {
            self.comp_level = CompLevel::from_code(&info.comp_level);
        }
        if info.match_number > 0 {
            self.match_number = info.match_number;
        }
        if self.comp_level.is_elimination() {
            if info.set_number.is_some() {
                self.set_number = info.set_number;
            }
        } else {
            self.set_number = None;
        }
        if info.time.is_some() {
            self.scheduled_time = info.time;
        }
        if info.predicted_time.is_some() {
            self.predicted_time = info.predicted_time;
        }
        if info.score_breakdown.is_some() {
            self.score_breakdown = info.score_breakdown.clone();
        }

        let declared = matches!(info.winning_alliance.as_deref(), Some("red" | "blue"));
        self.finished = self.finished || declared || info.actual_time.is_some();

        if let Some(alliances) = &info.alliances {
            if let Some((red, blue)) = alliances.team_keys() {
                self.red_teams = red.to_vec();
                self.blue_teams = blue.to_vec();
            }
            if self.finished
                && let Some((red, blue)) = alliances.scores()
            {
                self.red_score = Some(red);
                self.blue_score = Some(blue);
            }
        }

        if self.finished && info.winning_alliance.is_some() {
            self.winning_alliance = WinningAlliance::from_raw(info.winning_alliance.as_deref());
        }

        trace!(
            "Match {} updated: finished={}, winner={:?}, red={:?}, blue={:?}",
            self.key, self.finished, self.winning_alliance, self.red_teams, self.blue_teams
        );
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn event_key(&self) -> &str {
        &self.event_key
    }

    pub fn comp_level(&self) -> &CompLevel {
        &self.comp_level
    }

    pub fn match_number(&self) -> u32 {
        self.match_number
    }

    pub fn set_number(&self) -> Option<u32> {
        self.set_number
    }

    pub fn scheduled_time(&self) -> Option<i64> {
        self.scheduled_time
    }

    pub fn predicted_time(&self) -> Option<i64> {
        self.predicted_time
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn winning_alliance(&self) -> WinningAlliance {
        self.winning_alliance
    }

    pub fn red_teams(&self) -> &[String] {
        &self.red_teams
    }

    pub fn blue_teams(&self) -> &[String] {
        &self.blue_teams
    }

    pub fn red_score(&self) -> Option<i32> {
        self.red_score
    }

    pub fn blue_score(&self) -> Option<i32> {
        self.blue_score
    }

    pub fn score_breakdown(&self) -> Option<&serde_json::Value> {
        self.score_breakdown.as_ref()
    }

    /// Which alliance `team_key` played on. Red wins if a key is listed on both.
    pub fn color_of(&self, team_key: &str) -> Option<AllianceColor> {
        if self.red_teams.iter().any(|key| key == team_key) {
            Some(AllianceColor::Red)
        } else if self.blue_teams.iter().any(|key| key == team_key) {
            Some(AllianceColor::Blue)
        } else {
            None
        }
    }

    /// Result of this match for `team_key`, or `None` when the match is unfinished
    /// or the team did not play in it.
    pub fn outcome_for(&self, team_key: &str) -> Option<Outcome> {
        if !self.finished {
            return None;
        }
        self.color_of(team_key)
            .map(|color| self.winning_alliance.outcome_for(color))
    }

    /// Looks up both rosters in `teams`. Keys with no known team are dropped and
    /// reported as a warning; the partial rosters are still returned.
    pub fn resolve_teams<'a>(&self, teams: &'a TeamDirectory) -> ResolvedAlliances<'a> {
        let red: Vec<&Team> = self.red_teams.iter().filter_map(|key| teams.get(key)).collect();
        let blue: Vec<&Team> = self.blue_teams.iter().filter_map(|key| teams.get(key)).collect();

        if red.len() != self.red_teams.len() || blue.len() != self.blue_teams.len() {
            warn!(
                "Match {} couldn't resolve every team: red {}/{}, blue {}/{}",
                self.key,
                red.len(),
                self.red_teams.len(),
                blue.len(),
                self.blue_teams.len()
            );
        }

        ResolvedAlliances { red, blue }
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
