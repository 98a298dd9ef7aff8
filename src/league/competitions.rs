use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{LeagueStore, StoreError};
use crate::league::error::LeagueError;
use crate::league::validation::LeagueValidator;
use crate::models::competition::{Competition, CreateCompetitionRequest, UpdateCompetitionRequest};

/// Service responsible for competition management
pub struct CompetitionService {
    store: Arc<dyn LeagueStore>,
    validator: LeagueValidator,
}

impl CompetitionService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self {
            store,
            validator: LeagueValidator::new(),
        }
    }

    /// Create a new competition
    pub async fn create_competition(
        &self,
        request: CreateCompetitionRequest,
    ) -> Result<Competition, LeagueError> {
        let request = self.validator.validate_create_competition_request(&request)?;
        let now = Utc::now();

        let competition = Competition {
            id: Uuid::new_v4(),
            name: request.name,
            registration_starts_on: request.registration_starts_on,
            registration_ends_on: request.registration_ends_on,
            starts_on: request.starts_on,
            ends_on: request.ends_on,
            modalities: request.modalities,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_competition(&competition).await?;

        tracing::info!(
            "Created competition '{}' running from {} to {} with {} modalities",
            competition.name,
            competition.starts_on,
            competition.ends_on,
            competition.modalities.len()
        );

        Ok(competition)
    }

    /// Get a competition by ID
    pub async fn get_competition(&self, competition_id: Uuid) -> Result<Competition, LeagueError> {
        self.store
            .get_competition(competition_id)
            .await?
            .ok_or(LeagueError::CompetitionNotFound(competition_id))
    }

    /// All competitions, latest first
    pub async fn list_competitions(&self) -> Result<Vec<Competition>, LeagueError> {
        Ok(self.store.list_competitions().await?)
    }

    /// Replace the editable fields of a competition.
    ///
    /// The date window is frozen once fixtures exist; name, registration
    /// period and modalities can still change.
    pub async fn update_competition(
        &self,
        competition_id: Uuid,
        request: UpdateCompetitionRequest,
    ) -> Result<Competition, LeagueError> {
        let request = self.validator.validate_create_competition_request(&request)?;
        let current = self.get_competition(competition_id).await?;

        let competition = Competition {
            name: request.name,
            registration_starts_on: request.registration_starts_on,
            registration_ends_on: request.registration_ends_on,
            starts_on: request.starts_on,
            ends_on: request.ends_on,
            modalities: request.modalities,
            updated_at: Utc::now(),
            ..current
        };

        let updated = self
            .store
            .update_competition(&competition)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(reason) => {
                    tracing::warn!("Competition {} update refused: {}", competition_id, reason);
                    LeagueError::ScheduleLocked(competition_id)
                }
                other => LeagueError::from_store(other),
            })?;

        tracing::info!("Updated competition '{}' ({})", updated.name, updated.id);
        Ok(updated)
    }

    /// Delete a competition together with its teams and fixtures
    pub async fn delete_competition(&self, competition_id: Uuid) -> Result<(), LeagueError> {
        if !self.store.delete_competition(competition_id).await? {
            return Err(LeagueError::CompetitionNotFound(competition_id));
        }
        tracing::info!("Deleted competition {}", competition_id);
        Ok(())
    }
}
