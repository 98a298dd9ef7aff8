use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::competition::Competition;
use crate::models::fixture::{Fixture, FixtureStatus, FixtureTransitionError};
use crate::models::team::{ApprovalStatus, Team};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },
    #[error("Conflicting write: {0}")]
    Conflict(String),
    #[error(transparent)]
    InvalidTransition(#[from] FixtureTransitionError),
    #[error("Corrupt stored row: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait CompetitionStore: Send + Sync {
    async fn get_competition(&self, id: Uuid) -> Result<Option<Competition>, StoreError>;

    /// Latest competitions first (by start date).
    async fn list_competitions(&self) -> Result<Vec<Competition>, StoreError>;

    async fn insert_competition(&self, competition: &Competition) -> Result<(), StoreError>;

    /// Overwrites the editable fields. Fails with [`StoreError::Conflict`] when
    /// the date window changes while the competition has fixtures; the check
    /// and the write are atomic.
    async fn update_competition(&self, competition: &Competition) -> Result<Competition, StoreError>;

    /// Removes the competition with its teams and fixtures. Returns false when
    /// nothing was deleted.
    async fn delete_competition(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait TeamStore: Send + Sync {
    /// Approved teams only, in registration order.
    async fn list_approved_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, StoreError>;

    /// Every team of a competition, in registration order.
    async fn list_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, StoreError>;

    async fn insert_team(&self, team: &Team) -> Result<(), StoreError>;

    /// Fails with [`StoreError::Conflict`] when a team that already has
    /// fixtures would leave `approved`.
    async fn update_team_status(
        &self,
        id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Team, StoreError>;
}

#[async_trait]
pub trait FixtureStore: Send + Sync {
    /// Fixtures of a competition ordered by scheduled time.
    async fn list_fixtures(&self, competition_id: Uuid) -> Result<Vec<Fixture>, StoreError>;

    async fn get_fixture(&self, id: Uuid) -> Result<Option<Fixture>, StoreError>;

    /// Inserts the whole batch only when the competition has no fixtures yet.
    /// Fails with [`StoreError::Conflict`] otherwise; the check and the insert
    /// are atomic.
    async fn insert_fixtures(
        &self,
        competition_id: Uuid,
        fixtures: &[Fixture],
    ) -> Result<(), StoreError>;

    /// Stores both scores and marks the fixture completed. The current status
    /// is checked under the same write, so a cancelled fixture is never
    /// completed ([`StoreError::InvalidTransition`]).
    async fn update_fixture_result(
        &self,
        id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Fixture, StoreError>;

    /// Moves the fixture to `status` when its current status allows it, or
    /// fails with [`StoreError::InvalidTransition`].
    async fn update_fixture_status(
        &self,
        id: Uuid,
        status: FixtureStatus,
    ) -> Result<Fixture, StoreError>;

    async fn update_fixture_schedule(
        &self,
        id: Uuid,
        scheduled_at: DateTime<Utc>,
        location: &str,
    ) -> Result<Fixture, StoreError>;

    /// Returns false when nothing was deleted.
    async fn delete_fixture(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Pending fixtures scheduled strictly after `after`, earliest first.
    async fn list_upcoming_fixtures(
        &self,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Fixture>, StoreError>;
}

/// Everything the league services need from persistence.
pub trait LeagueStore: CompetitionStore + TeamStore + FixtureStore {}

impl<T> LeagueStore for T where T: CompetitionStore + TeamStore + FixtureStore {}
