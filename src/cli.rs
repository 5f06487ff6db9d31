use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};
use frc_records::aggregation::TeamFilter;
use frc_records::constants::DEFAULT_RANKING_LIMIT;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Config commands print or persist settings and exit without touching a snapshot.
pub fn is_config_command(args: &Args) -> bool {
    args.list_config || args.new_snapshot_path.is_some() || args.new_season.is_some()
}

/// True when any team filter flag was given.
pub fn has_team_filter(args: &Args) -> bool {
    args.state.is_some()
        || args.country.is_some()
        || args.min_number.is_some()
        || args.max_number.is_some()
        || args.in_event.is_some()
}

/// Requested ranking size, if a ranking was asked for.
pub fn ranking_limit(args: &Args) -> Option<usize> {
    args.top.map(|limit| limit.unwrap_or(DEFAULT_RANKING_LIMIT))
}

pub fn team_filter(args: &Args) -> TeamFilter {
    TeamFilter {
        state: args.state.clone(),
        country: args.country.clone(),
        min_number: args.min_number,
        max_number: args.max_number,
        event_key: args.in_event.clone(),
    }
}

/// FRC win/loss/tie records
///
/// Loads teams and events from a JSON results snapshot, recomputes every team's
/// record per event and prints the requested reports.
///
/// Without --event, every event of the season is loaded.
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
#[command(version)]
#[command(styles = get_styles())]
pub struct Args {
    /// Results snapshot (JSON) to read. Overrides the configured snapshot.
    #[arg(short = 's', long = "snapshot", value_name = "PATH", help_heading = "Data")]
    pub snapshot: Option<String>,

    /// Season to load teams and events for. Overrides the configured season.
    #[arg(long = "season", value_name = "YEAR", help_heading = "Data")]
    pub season: Option<i32>,

    /// Event to load. Repeat to load several; defaults to every event of the season.
    #[arg(short = 'e', long = "event", value_name = "KEY", help_heading = "Data")]
    pub events: Vec<String>,

    /// Only report events that are in progress today.
    #[arg(long = "current", help_heading = "Data")]
    pub current_only: bool,

    /// Evaluate started/finished events as of this date (YYYY-MM-DD) instead of today.
    #[arg(long = "today", value_name = "DATE", help_heading = "Data")]
    pub today: Option<String>,

    /// Print the record of this team
    #[arg(short = 't', long = "team", value_name = "NUMBER", help_heading = "Reports")]
    pub team: Option<u32>,

    /// Restrict the team record to one season. Requires --team.
    #[arg(long = "year", value_name = "YEAR", help_heading = "Reports")]
    pub year: Option<i32>,

    /// Rank teams by wins over the loaded events (top 10 unless N is given)
    #[arg(long = "top", value_name = "N", num_args = 0..=1, help_heading = "Reports")]
    pub top: Option<Option<usize>>,

    /// List teams from this state or province
    #[arg(long = "state", help_heading = "Filters")]
    pub state: Option<String>,

    /// List teams from this country
    #[arg(long = "country", help_heading = "Filters")]
    pub country: Option<String>,

    /// List teams numbered at least this
    #[arg(long = "min-number", help_heading = "Filters")]
    pub min_number: Option<u32>,

    /// List teams numbered at most this
    #[arg(long = "max-number", help_heading = "Filters")]
    pub max_number: Option<u32>,

    /// List teams rostered at this event
    #[arg(long = "in-event", value_name = "KEY", help_heading = "Filters")]
    pub in_event: Option<String>,

    /// Store the snapshot path in config
    #[arg(long = "set-snapshot", value_name = "PATH", help_heading = "Configuration")]
    pub new_snapshot_path: Option<String>,

    /// Store the default season in config
    #[arg(long = "set-season", value_name = "YEAR", help_heading = "Configuration")]
    pub new_season: Option<i32>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also print logs to the terminal
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeatable_event_flag() {
        let args = Args::parse_from(["frc_records", "-e", "2024cala", "--event", "2024casf"]);
        assert_eq!(args.events, vec!["2024cala", "2024casf"]);
        assert!(!is_config_command(&args));
    }

    #[test]
    fn test_top_defaults_when_value_omitted() {
        let args = Args::parse_from(["frc_records", "--top"]);
        assert_eq!(ranking_limit(&args), Some(DEFAULT_RANKING_LIMIT));

        let args = Args::parse_from(["frc_records", "--top", "3"]);
        assert_eq!(ranking_limit(&args), Some(3));

        let args = Args::parse_from(["frc_records"]);
        assert_eq!(ranking_limit(&args), None);
    }

    #[test]
    fn test_filter_flags_build_team_filter() {
        let args = Args::parse_from(["frc_records", "--state", "Michigan", "--min-number", "100"]);
        assert!(has_team_filter(&args));

        let filter = team_filter(&args);
        assert_eq!(filter.state.as_deref(), Some("Michigan"));
        assert_eq!(filter.min_number, Some(100));
        assert_eq!(filter.event_key, None);
    }

    #[test]
    fn test_config_commands() {
        let args = Args::parse_from(["frc_records", "--set-season", "2024"]);
        assert!(is_config_command(&args));
        assert!(is_config_command(&Args::parse_from(["frc_records", "-l"])));
    }
}
