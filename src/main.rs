mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Args, is_config_command};
use frc_records::config::Config;
use frc_records::error::AppError;

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    commands::validate_args(&args)?;

    // Config commands must keep working when the stored config is invalid
    if is_config_command(&args) {
        if args.list_config {
            return commands::handle_list_config_command();
        }
        return commands::handle_config_update_command(&args);
    }

    let config = Config::load()?;
    let (log_file_path, _guard) = logging::setup_logging(&args, Some(&config))?;
    tracing::info!("Logs are being written to: {log_file_path}");

    let result = commands::handle_report_command(&args, &config);
    if let Err(e) = &result {
        tracing::error!("Report failed: {e}");
    }
    result
}
