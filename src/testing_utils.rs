use crate::aggregation::TeamDirectory;
use crate::models::Team;
use crate::provider::{
    AllianceInfo, EventInfo, EventSnapshot, MatchAllianceInfo, MatchAlliances, MatchInfo,
    Snapshot, SnapshotTeam, TeamInfo,
};
use serde_json::json;

/// Test utilities for building provider payloads and snapshots
pub struct TestDataBuilder;

/// Splits "2024cala_f1m2" into ("2024cala", "f", Some(1), 2).
fn parse_match_key(key: &str) -> (String, String, Option<u32>, u32) {
    let (event_key, suffix) = key.split_once('_').unwrap_or((key, ""));
    let level: String = suffix.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    let rest = &suffix[level.len()..];

    let (set_number, match_number) = match rest.split_once('m') {
        Some((set, number)) => (set.parse().ok(), number.parse().unwrap_or(0)),
        None => (None, rest.parse().unwrap_or(0)),
    };
    (event_key.to_string(), level, set_number, match_number)
}

fn keys(teams: &[&str]) -> Vec<String> {
    teams.iter().map(|team| team.to_string()).collect()
}

impl TestDataBuilder {
    /// A scheduled match with both rosters known and no result yet
    pub fn scheduled_match(key: &str, red: &[&str], blue: &[&str]) -> MatchInfo {
        let (event_key, comp_level, set_number, match_number) = parse_match_key(key);
        MatchInfo {
            key: key.to_string(),
            event_key,
            comp_level,
            match_number,
            set_number,
            time: Some(1_711_555_200),
            predicted_time: Some(1_711_555_500),
            actual_time: None,
            winning_alliance: None,
            alliances: Some(MatchAlliances {
                red: Some(MatchAllianceInfo {
                    team_keys: Some(keys(red)),
                    score: None,
                }),
                blue: Some(MatchAllianceInfo {
                    team_keys: Some(keys(blue)),
                    score: None,
                }),
            }),
            score_breakdown: None,
        }
    }

    /// A played match. `winner` is "red", "blue" or "" for a tie; the winning
    /// side scores 100 and the losing side 80.
    pub fn finished_match(key: &str, red: &[&str], blue: &[&str], winner: &str) -> MatchInfo {
        let (red_score, blue_score) = match winner {
            "red" => (100, 80),
            "blue" => (80, 100),
            _ => (90, 90),
        };
        let mut info = Self::scheduled_match(key, red, blue);
        info.actual_time = Some(1_711_555_800);
        info.winning_alliance = Some(winner.to_string());
        if let Some(alliances) = info.alliances.as_mut() {
            if let Some(red) = alliances.red.as_mut() {
                red.score = Some(red_score);
            }
            if let Some(blue) = alliances.blue.as_mut() {
                blue.score = Some(blue_score);
            }
        }
        info.score_breakdown = Some(json!({
            "red": { "totalPoints": red_score },
            "blue": { "totalPoints": blue_score }
        }));
        info
    }

    /// A playoff alliance with its status wrapped the way the service sends it
    pub fn alliance(picks: &[&str], status: Option<&str>) -> AllianceInfo {
        AllianceInfo {
            name: None,
            picks: keys(picks),
            status: status.map(|status| json!({ "status": status })),
        }
    }

    pub fn team_info(team_number: u32) -> TeamInfo {
        TeamInfo {
            team_number,
            name: Some(format!("Sponsors of {team_number}")),
            nickname: Some(format!("Team {team_number}")),
            city: Some("Los Angeles".to_string()),
            state_prov: Some("California".to_string()),
            country: Some("USA".to_string()),
        }
    }

    pub fn team_directory(team_numbers: &[u32]) -> TeamDirectory {
        team_numbers
            .iter()
            .map(|&number| Team::from_info(&Self::team_info(number)))
            .collect()
    }

    /// Regular-season event metadata with the given ISO dates
    pub fn event_info(key: &str, start_date: &str, end_date: &str) -> EventInfo {
        EventInfo {
            key: key.to_string(),
            name: Some(format!("{key} Regional")),
            event_code: key.get(4..).map(str::to_string),
            event_type: Some(0),
            event_type_string: Some("Regional".to_string()),
            city: Some("Los Angeles".to_string()),
            state_prov: Some("California".to_string()),
            country: Some("USA".to_string()),
            start_date: Some(start_date.to_string()),
            end_date: Some(end_date.to_string()),
            ..Default::default()
        }
    }

    /// One event, 2024cala (March 27-30 2024), with teams 1-4 rostered.
    ///
    /// - qm1: red frc1+frc2 beat blue frc3
    /// - qm2: frc4 vs frc3, scheduled only
    /// - alliances: frc1+frc2 won, frc3+frc4 eliminated
    pub fn championship_snapshot() -> Snapshot {
        Snapshot {
            teams: (1..=4)
                .map(|number| SnapshotTeam {
                    info: Self::team_info(number),
                    years: Vec::new(),
                })
                .collect(),
            events: vec![EventSnapshot {
                event: Self::event_info("2024cala", "2024-03-27", "2024-03-30"),
                alliances: Some(vec![
                    Some(Self::alliance(&["frc1", "frc2"], Some("won"))),
                    Some(Self::alliance(&["frc3", "frc4"], Some("eliminated"))),
                ]),
                alliances_unavailable: false,
                matches: vec![
                    Self::finished_match("2024cala_qm1", &["frc1", "frc2"], &["frc3"], "red"),
                    Self::scheduled_match("2024cala_qm2", &["frc4"], &["frc3"]),
                ],
                teams: keys(&["frc1", "frc2", "frc3", "frc4"]),
            }],
        }
    }
}
