use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::LeagueStore;
use crate::league::error::LeagueError;
use crate::league::validation::{LeagueValidator, ValidationError};
use crate::models::fixture::{Fixture, FixtureStatus};

/// Service responsible for individual fixture operations
pub struct FixtureService {
    store: Arc<dyn LeagueStore>,
    validator: LeagueValidator,
}

impl FixtureService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self {
            store,
            validator: LeagueValidator::new(),
        }
    }

    async fn load(&self, fixture_id: Uuid) -> Result<Fixture, LeagueError> {
        self.store
            .get_fixture(fixture_id)
            .await?
            .ok_or(LeagueError::FixtureNotFound(fixture_id))
    }

    /// Record (or correct) the result of a fixture and return it updated
    pub async fn record_result(
        &self,
        fixture_id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Fixture, LeagueError> {
        self.validator.validate_scores(home_score, away_score)?;

        let fixture = self.load(fixture_id).await?;
        fixture.ensure_can_record_result()?;

        let correcting = fixture.status == FixtureStatus::Completed;
        // The store re-checks the status inside the write.
        let updated = self
            .store
            .update_fixture_result(fixture_id, home_score, away_score)
            .await
            .map_err(LeagueError::from_store)?;

        if correcting {
            tracing::info!(
                "Corrected fixture {} result: {:?}-{:?} -> {}-{}",
                fixture_id,
                fixture.home_score,
                fixture.away_score,
                home_score,
                away_score
            );
        } else {
            tracing::info!(
                "Recorded fixture {} result: {}-{}",
                fixture_id,
                home_score,
                away_score
            );
        }

        Ok(updated)
    }

    /// Administrative cancellation; only pending fixtures can be cancelled
    pub async fn cancel_fixture(&self, fixture_id: Uuid) -> Result<Fixture, LeagueError> {
        let fixture = self.load(fixture_id).await?;
        fixture.ensure_can_cancel()?;

        let updated = self
            .store
            .update_fixture_status(fixture_id, FixtureStatus::Cancelled)
            .await
            .map_err(LeagueError::from_store)?;

        tracing::info!("Cancelled fixture {}", fixture_id);
        Ok(updated)
    }

    /// Move a fixture to another date and/or location
    pub async fn reschedule_fixture(
        &self,
        fixture_id: Uuid,
        scheduled_at: Option<DateTime<Utc>>,
        location: Option<String>,
    ) -> Result<Fixture, LeagueError> {
        let fixture = self.load(fixture_id).await?;
        if fixture.status == FixtureStatus::Cancelled {
            return Err(ValidationError(format!(
                "Fixture {} is cancelled and cannot be rescheduled",
                fixture_id
            ))
            .into());
        }

        let scheduled_at = scheduled_at.unwrap_or(fixture.scheduled_at);
        let location = match location {
            Some(location) => {
                let sanitized = self.validator.sanitize_string_input(&location);
                if sanitized.is_empty() {
                    fixture.location.clone()
                } else {
                    sanitized
                }
            }
            None => fixture.location.clone(),
        };

        let updated = self
            .store
            .update_fixture_schedule(fixture_id, scheduled_at, &location)
            .await
            .map_err(LeagueError::from_store)?;

        tracing::info!(
            "Rescheduled fixture {} to {} at '{}'",
            fixture_id,
            scheduled_at,
            location
        );
        Ok(updated)
    }

    /// Remove a fixture from the record entirely
    pub async fn delete_fixture(&self, fixture_id: Uuid) -> Result<(), LeagueError> {
        if !self.store.delete_fixture(fixture_id).await? {
            return Err(LeagueError::FixtureNotFound(fixture_id));
        }
        tracing::info!("Deleted fixture {}", fixture_id);
        Ok(())
    }

    /// All fixtures of a competition, earliest first
    pub async fn list_fixtures(&self, competition_id: Uuid) -> Result<Vec<Fixture>, LeagueError> {
        self.store
            .get_competition(competition_id)
            .await?
            .ok_or(LeagueError::CompetitionNotFound(competition_id))?;

        Ok(self.store.list_fixtures(competition_id).await?)
    }

    /// Next pending fixtures across all competitions
    pub async fn upcoming_fixtures(
        &self,
        limit: Option<i64>,
        default_limit: i64,
    ) -> Result<Vec<Fixture>, LeagueError> {
        let limit = self.validator.validate_limit(limit, default_limit)?;
        Ok(self.store.list_upcoming_fixtures(Utc::now(), limit).await?)
    }
}
