use crate::cli::Args;
use frc_records::config::Config;
use frc_records::constants::paths::LOG_FILE_NAME;
use frc_records::error::AppError;
use std::io::stdout;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn env_filter() -> Result<EnvFilter, AppError> {
    let directive = "frc_records=info"
        .parse()
        .map_err(|e| AppError::log_setup_error(format!("Invalid log directive: {e}")))?;
    Ok(EnvFilter::from_default_env().add_directive(directive))
}

/// Splits a custom log path into (directory, file name), falling back to the
/// default location when none is given.
fn log_target(custom_log_path: Option<&String>) -> (String, String) {
    match custom_log_path {
        Some(custom_path) => {
            let path = Path::new(custom_path);
            let parent = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(LOG_FILE_NAME);
            (parent.to_string_lossy().to_string(), file_name.to_string())
        }
        None => (Config::get_log_dir_path(), LOG_FILE_NAME.to_string()),
    }
}

/// Sets up logging configuration for the application.
///
/// - Always logs to a daily rolling file, creating the log directory if needed
/// - With --debug, also logs to stdout
///
/// Returns the path to the log file and the guard that must be kept alive
/// for the duration of the program to ensure proper log flushing.
pub fn setup_logging(args: &Args, config: Option<&Config>) -> Result<(String, WorkerGuard), AppError> {
    let config_log_path = config.and_then(|config| config.log_file_path.as_ref());
    let (log_dir, log_file_name) = log_target(args.log_file.as_ref().or(config_log_path));

    if !Path::new(&log_dir).exists() {
        std::fs::create_dir_all(&log_dir).map_err(|e| {
            AppError::log_setup_error(format!("Failed to create log directory: {e}"))
        })?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, &log_file_name);

    // The guard must outlive every log call or buffered lines are lost
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::Layer::new()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_filter(env_filter()?);

    if args.debug {
        tracing_subscriber::registry()
            .with(file_layer)
            .with(
                fmt::Layer::new()
                    .with_writer(stdout)
                    .with_ansi(true)
                    .with_filter(env_filter()?),
            )
            .init();
    } else {
        tracing_subscriber::registry().with(file_layer).init();
    }

    let log_file_path = format!("{log_dir}/{log_file_name}");
    Ok((log_file_path, guard))
}
