pub mod competitions;
pub mod error;
pub mod fixtures;
#[allow(clippy::module_inception)]
pub mod league;
pub mod schedule;
pub mod standings;
pub mod teams;
pub mod validation;

pub use error::LeagueError;
pub use league::LeagueService;
pub use schedule::{ScheduleError, ScheduleService, Scheduler};
pub use standings::{compute_competition_standings, compute_standings, StandingsService};
