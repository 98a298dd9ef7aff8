use uuid::Uuid;

use crate::db::StoreError;
use crate::league::validation::ValidationError;
use crate::models::fixture::FixtureTransitionError;

/// Failures of the competition, team and fixture management operations.
#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("Competition {0} not found")]
    CompetitionNotFound(Uuid),
    #[error("Team {0} not found")]
    TeamNotFound(Uuid),
    #[error("Fixture {0} not found")]
    FixtureNotFound(Uuid),
    #[error("Competition {0} already has fixtures, its dates can no longer change")]
    ScheduleLocked(Uuid),
    #[error("Team {0} already has fixtures and must stay approved")]
    TeamHasFixtures(Uuid),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    InvalidTransition(#[from] FixtureTransitionError),
    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl LeagueError {
    /// Map a store-level "not found" onto the matching domain variant.
    pub(crate) fn from_store(error: StoreError) -> Self {
        match error {
            StoreError::NotFound { entity: "Competition", id } => LeagueError::CompetitionNotFound(id),
            StoreError::NotFound { entity: "Team", id } => LeagueError::TeamNotFound(id),
            StoreError::NotFound { entity: "Fixture", id } => LeagueError::FixtureNotFound(id),
            StoreError::InvalidTransition(e) => LeagueError::InvalidTransition(e),
            other => LeagueError::Storage(other),
        }
    }
}
