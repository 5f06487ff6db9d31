//! Session-wide aggregation: the team directory, cached events and the
//! orchestrator that keeps them consistent.

pub mod directory;
pub mod filters;
pub mod orchestrator;

pub use directory::TeamDirectory;
pub use filters::{SortOrder, TeamFilter, rank_by_attr};
pub use orchestrator::{Orchestrator, progress_checkpoints};
