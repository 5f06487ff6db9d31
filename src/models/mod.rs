//! Domain model: teams, events, matches and the records derived from them.

pub mod alliance;
pub mod attributes;
pub mod event;
pub mod location;
pub mod match_record;
pub mod record;
pub mod team;

pub use alliance::{Alliance, AllianceStatus};
pub use attributes::{AttrValue, AttributeStore};
pub use event::{Event, year_from_event_key};
pub use location::Location;
pub use match_record::{AllianceColor, CompLevel, Match, ResolvedAlliances, WinningAlliance};
pub use record::{Outcome, Record};
pub use team::{RecordScope, Team};
