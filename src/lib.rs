//! FRC win/loss/tie record aggregation.
//!
//! Pulls teams, events, matches and playoff alliances from a [`provider::ResultsProvider`]
//! and derives per-team records per event, per season and overall.
//!
//! # Examples
//!
//! ```rust,no_run
//! use frc_records::aggregation::{Orchestrator, SortOrder, TeamFilter};
//! use frc_records::error::AppError;
//! use frc_records::models::RecordScope;
//! use frc_records::provider::SnapshotProvider;
//!
//! fn main() -> Result<(), AppError> {
//!     let provider = SnapshotProvider::from_path("season-2024.json")?;
//!     let mut orchestrator = Orchestrator::new(provider, Some(2024))?;
//!
//!     // Refreshing an event recomputes every rostered team's record for it
//!     orchestrator.get_event("2024cala")?;
//!
//!     if let Some(team) = orchestrator.team_by_number(254) {
//!         println!("{team}: {}", team.total_record(RecordScope::Year(2024)));
//!     }
//!
//!     let californians = orchestrator.filter_team_list(&TeamFilter::new().state("California"))?;
//!     println!("{} teams from California", californians.len());
//!
//!     orchestrator.init_team_attribute("opr", 0.0);
//!     let top = orchestrator.get_ranked_team_list_by_attr("opr", SortOrder::Descending, 10);
//!     println!("{} ranked", top.len());
//!
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod provider;
pub mod testing_utils;

pub use aggregation::{Orchestrator, SortOrder, TeamDirectory, TeamFilter};
pub use config::Config;
pub use error::AppError;
pub use models::{Alliance, Event, Location, Match, Record, RecordScope, Team};
pub use provider::{ResultsProvider, SnapshotProvider};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
