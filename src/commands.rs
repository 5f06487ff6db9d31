use crate::cli::{self, Args};
use chrono::NaiveDate;
use frc_records::aggregation::{Orchestrator, SortOrder};
use frc_records::config::Config;
use frc_records::error::AppError;
use frc_records::models::{Event, RecordScope, Team};
use frc_records::provider::{ResultsProvider, SnapshotProvider};
use tracing::info;

/// Attribute the ranking report sorts by.
const WINS_ATTR: &str = "wins";

/// Validates command line argument combinations.
///
/// Returns an error if incompatible arguments are used together.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    if args.year.is_some() && args.team.is_none() {
        return Err(AppError::config_error("--year only applies together with --team"));
    }
    if let (Some(min), Some(max)) = (args.min_number, args.max_number)
        && min > max
    {
        return Err(AppError::config_error(format!(
            "--min-number {min} is larger than --max-number {max}"
        )));
    }
    Ok(())
}

/// Parses the --today override.
pub fn parse_today(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| {
        AppError::datetime_parse_error(format!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
    })
}

/// Handles the --list-config command.
pub fn handle_list_config_command() -> Result<(), AppError> {
    Config::display()
}

/// Handles configuration update commands (--set-snapshot, --set-season).
pub fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().unwrap_or_default();

    if let Some(snapshot) = &args.new_snapshot_path {
        config.snapshot_path = Some(snapshot.clone());
    }
    if let Some(season) = args.new_season {
        config.season = Some(season);
    }

    config.validate()?;
    config.save()?;
    println!("Config updated successfully!");

    Ok(())
}

/// Loads the snapshot, fetches the requested events and prints every report asked for.
pub fn handle_report_command(args: &Args, config: &Config) -> Result<(), AppError> {
    let snapshot_path = args
        .snapshot
        .as_ref()
        .or(config.snapshot_path.as_ref())
        .ok_or_else(|| {
            AppError::config_error("No snapshot configured. Use --snapshot PATH or --set-snapshot PATH")
        })?;
    let season = args.season.or(config.season);
    let today = args.today.as_deref().map(parse_today).transpose()?;

    let provider = SnapshotProvider::from_path(snapshot_path)?;
    let mut orchestrator = Orchestrator::new(provider, season)?;
    if let Some(today) = today {
        orchestrator = orchestrator.with_today(today);
    }

    for line in load_events(&mut orchestrator, args, season)? {
        println!("{line}");
    }

    if let Some(number) = args.team {
        let team = orchestrator
            .team_by_number(number)
            .ok_or_else(|| AppError::team_not_found(Team::key_for(number)))?;
        println!();
        for line in format_team_report(team, args.year) {
            println!("{line}");
        }
    }

    if let Some(limit) = cli::ranking_limit(args) {
        populate_wins(&mut orchestrator, season);
        let ranked = orchestrator.get_ranked_team_list_by_attr(WINS_ATTR, SortOrder::Descending, limit);
        println!();
        for line in format_ranking(&ranked, season) {
            println!("{line}");
        }
    }

    if cli::has_team_filter(args) {
        let teams = orchestrator.filter_team_list(&cli::team_filter(args))?;
        println!();
        println!("{} matching teams", teams.len());
        for team in teams {
            println!("{}", format_team_line(team));
        }
    }

    Ok(())
}

/// Fetches the events named on the command line, or the whole season, and
/// returns one summary line per event.
pub fn load_events<P: ResultsProvider>(
    orchestrator: &mut Orchestrator<P>,
    args: &Args,
    season: Option<i32>,
) -> Result<Vec<String>, AppError> {
    if !args.events.is_empty() {
        let today = orchestrator.today();
        let mut lines = Vec::new();
        for key in &args.events {
            let event = orchestrator.get_event(key)?;
            if !args.current_only || event.is_ongoing_on(today) {
                lines.push(format_event_line(event));
            }
        }
        return Ok(lines);
    }

    let season = season.ok_or_else(|| {
        AppError::config_error("Pass --event KEY or choose a season with --season YEAR")
    })?;
    let events = orchestrator.get_events(season, args.current_only)?;
    info!("Reporting {} events for {}", events.len(), season);
    Ok(events.into_iter().map(format_event_line).collect())
}

/// Stores each team's win count under the ranking attribute, scoped to `season` when given.
pub fn populate_wins<P: ResultsProvider>(orchestrator: &mut Orchestrator<P>, season: Option<i32>) {
    let scope = season.map_or(RecordScope::All, RecordScope::Year);
    orchestrator.init_team_attribute(WINS_ATTR, 0_u32);
    for team in orchestrator.teams_mut() {
        let wins = team.total_record(scope).wins;
        team.set_attr(WINS_ATTR, wins);
    }
}

pub fn format_event_line(event: &Event) -> String {
    let mut line = event.to_string();
    if let (Some(start), Some(end)) = (event.start_date(), event.end_date()) {
        line.push_str(&format!(" [{start} - {end}]"));
    }
    line.push_str(&format!(
        ": {} matches, {} teams",
        event.matches().count(),
        event.teams().len()
    ));
    if let Some(winner) = event.winning_alliance() {
        line.push_str(&format!(", won by {}", winner.team_keys().join(" ")));
    }
    line
}

pub fn format_team_line(team: &Team) -> String {
    let location = team.location().display_string();
    if location.is_empty() {
        team.to_string()
    } else {
        format!("{team} ({location})")
    }
}

pub fn format_team_report(team: &Team, year: Option<i32>) -> Vec<String> {
    let mut lines = vec![format_team_line(team)];

    for (event_key, record) in team.event_records() {
        if year.is_none_or(|year| event_key.starts_with(&year.to_string())) {
            lines.push(format!("  {event_key}: {record}"));
        }
    }

    let scope = year.map_or(RecordScope::All, RecordScope::Year);
    let total = team.total_record(scope);
    let label = year.map_or_else(|| "all seasons".to_string(), |year| year.to_string());
    let rate = total
        .win_rate()
        .map_or_else(|| "-".to_string(), |rate| format!("{:.1}%", rate * 100.0));
    lines.push(format!("  Total ({label}): {total}, win rate {rate}"));

    if let Some(year) = year {
        let wins = team.distinct_event_wins(year);
        if !wins.is_empty() {
            let wins: Vec<&str> = wins.into_iter().collect();
            lines.push(format!("  Event wins: {}", wins.join(", ")));
        }
    }
    lines
}

pub fn format_ranking(teams: &[&Team], season: Option<i32>) -> Vec<String> {
    let scope = season.map_or(RecordScope::All, RecordScope::Year);
    teams
        .iter()
        .enumerate()
        .map(|(i, team)| {
            format!(
                "{:>3}. {:<40} {}",
                i + 1,
                format_team_line(team),
                team.total_record(scope)
            )
        })
        .collect()
}
