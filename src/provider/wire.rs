//! Payload shapes handed over by a results provider.
//!
//! Field names follow the statistics service's JSON so snapshots exported from it
//! deserialize without translation. Everything that the service may omit is optional.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TeamInfo {
    pub team_number: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "state")]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct EventInfo {
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub event_code: Option<String>,
    /// Program-defined ordinal; values up to 6 are official event types
    #[serde(default)]
    pub event_type: Option<i32>,
    #[serde(default)]
    pub event_type_string: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default, alias = "state")]
    pub state_prov: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    /// ISO-8601 date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// ISO-8601 date (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub week: Option<u32>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub playoff_type: Option<i32>,
    #[serde(default)]
    pub playoff_type_string: Option<String>,
}

/// One playoff alliance as reported for a finished event.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AllianceInfo {
    #[serde(default)]
    pub name: Option<String>,
    /// Team keys in pick order, captain first
    #[serde(default)]
    pub picks: Vec<String>,
    /// Expected to be an object carrying a `status` string; anything else is treated as unknown
    #[serde(default)]
    pub status: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MatchAllianceInfo {
    #[serde(default)]
    pub team_keys: Option<Vec<String>>,
    #[serde(default)]
    pub score: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MatchAlliances {
    #[serde(default)]
    pub red: Option<MatchAllianceInfo>,
    #[serde(default)]
    pub blue: Option<MatchAllianceInfo>,
}

impl MatchAlliances {
    /// Both rosters, only when both colors report a team-key list.
    pub fn team_keys(&self) -> Option<(&[String], &[String])> {
        let red = self.red.as_ref()?.team_keys.as_deref()?;
        let blue = self.blue.as_ref()?.team_keys.as_deref()?;
        Some((red, blue))
    }

    /// Both scores as (red, blue), only when both colors report one.
    pub fn scores(&self) -> Option<(i32, i32)> {
        let red = self.red.as_ref()?.score?;
        let blue = self.blue.as_ref()?.score?;
        Some((red, blue))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MatchInfo {
    pub key: String,
    #[serde(default)]
    pub event_key: String,
    /// "qm", "ef", "qf", "sf" or "f"
    #[serde(default)]
    pub comp_level: String,
    #[serde(default)]
    pub match_number: u32,
    #[serde(default)]
    pub set_number: Option<u32>,
    /// Scheduled start, unix seconds
    #[serde(default)]
    pub time: Option<i64>,
    #[serde(default)]
    pub predicted_time: Option<i64>,
    #[serde(default)]
    pub actual_time: Option<i64>,
    /// "red", "blue", or an empty string for a tie
    #[serde(default)]
    pub winning_alliance: Option<String>,
    #[serde(default)]
    pub alliances: Option<MatchAlliances>,
    #[serde(default)]
    pub score_breakdown: Option<serde_json::Value>,
}
