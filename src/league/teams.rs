use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::{LeagueStore, StoreError};
use crate::league::error::LeagueError;
use crate::league::validation::LeagueValidator;
use crate::models::team::{ApprovalStatus, Team, TeamRegistrationRequest};
use crate::services::{Notification, NotificationQueue};

/// Service responsible for team registration and approval
pub struct TeamService {
    store: Arc<dyn LeagueStore>,
    notifications: NotificationQueue,
    validator: LeagueValidator,
}

impl TeamService {
    pub fn new(store: Arc<dyn LeagueStore>, notifications: NotificationQueue) -> Self {
        Self {
            store,
            notifications,
            validator: LeagueValidator::new(),
        }
    }

    /// Register a team; it waits in `pending` until an organizer reviews it
    pub async fn register_team(
        &self,
        competition_id: Uuid,
        request: TeamRegistrationRequest,
    ) -> Result<Team, LeagueError> {
        let request = self.validator.validate_team_registration(&request)?;

        self.store
            .get_competition(competition_id)
            .await?
            .ok_or(LeagueError::CompetitionNotFound(competition_id))?;

        let team = Team {
            id: Uuid::new_v4(),
            competition_id,
            name: request.name,
            modality: request.modality,
            status: ApprovalStatus::Pending,
            contact_name: request.contact_name,
            contact_email: request.contact_email,
            created_at: Utc::now(),
        };
        self.store
            .insert_team(&team)
            .await
            .map_err(LeagueError::from_store)?;

        tracing::info!(
            "Registered team '{}' ({}) in competition {}",
            team.name,
            team.modality_key(),
            competition_id
        );
        Ok(team)
    }

    pub async fn list_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, LeagueError> {
        self.store
            .get_competition(competition_id)
            .await?
            .ok_or(LeagueError::CompetitionNotFound(competition_id))?;

        Ok(self.store.list_teams(competition_id).await?)
    }

    /// Approve, reject or reset a team and let its contact know.
    ///
    /// Once a team has fixtures it stays approved, so its results keep
    /// counting in its opponents' tables.
    pub async fn update_team_status(
        &self,
        team_id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Team, LeagueError> {
        let team = self
            .store
            .update_team_status(team_id, status)
            .await
            .map_err(|e| match e {
                StoreError::Conflict(_) => LeagueError::TeamHasFixtures(team_id),
                other => LeagueError::from_store(other),
            })?;

        tracing::info!("Team '{}' ({}) is now {}", team.name, team.id, status);

        let (subject, text) = match status {
            ApprovalStatus::Approved => (
                "Your team has been approved",
                "Your team has been approved to take part in the competition.",
            ),
            ApprovalStatus::Rejected => (
                "Team status changed",
                "Your team's registration for the competition was rejected.",
            ),
            ApprovalStatus::Pending => (
                "Team status changed",
                "Your team's registration is pending review again.",
            ),
        };
        self.notifications.enqueue(Notification {
            contact: team.contact_email.clone(),
            subject: subject.to_string(),
            body: format!(
                "<p>Hello {},</p><p>{}</p><p><strong>Team:</strong> {}</p><p><strong>Status:</strong> {}</p>",
                team.contact_name, text, team.name, status
            ),
        });

        Ok(team)
    }
}
