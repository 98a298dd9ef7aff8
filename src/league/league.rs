use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::settings::LeagueSettings;
use crate::db::LeagueStore;
use crate::league::competitions::CompetitionService;
use crate::league::error::LeagueError;
use crate::league::fixtures::FixtureService;
use crate::league::schedule::{ScheduleError, ScheduleService, Scheduler};
use crate::league::standings::StandingsService;
use crate::league::teams::TeamService;
use crate::models::competition::{Competition, CreateCompetitionRequest, UpdateCompetitionRequest};
use crate::models::fixture::{Fixture, ScheduleOutcome};
use crate::models::standings::CompetitionStandingsResponse;
use crate::models::team::{ApprovalStatus, Team, TeamRegistrationRequest};
use crate::services::NotificationQueue;

/// Main league service that orchestrates all competition operations
pub struct LeagueService {
    competitions: CompetitionService,
    teams: TeamService,
    schedule: ScheduleService,
    fixtures: FixtureService,
    standings: StandingsService,
    settings: LeagueSettings,
}

impl LeagueService {
    pub fn new(
        store: Arc<dyn LeagueStore>,
        notifications: NotificationQueue,
        settings: LeagueSettings,
    ) -> Self {
        Self {
            competitions: CompetitionService::new(store.clone()),
            teams: TeamService::new(store.clone(), notifications.clone()),
            schedule: ScheduleService::new(store.clone(), Scheduler::new(&settings), notifications),
            fixtures: FixtureService::new(store.clone()),
            standings: StandingsService::new(store),
            settings,
        }
    }

    pub async fn create_competition(
        &self,
        request: CreateCompetitionRequest,
    ) -> Result<Competition, LeagueError> {
        self.competitions.create_competition(request).await
    }

    pub async fn get_competition(&self, competition_id: Uuid) -> Result<Competition, LeagueError> {
        self.competitions.get_competition(competition_id).await
    }

    pub async fn list_competitions(&self) -> Result<Vec<Competition>, LeagueError> {
        self.competitions.list_competitions().await
    }

    pub async fn update_competition(
        &self,
        competition_id: Uuid,
        request: UpdateCompetitionRequest,
    ) -> Result<Competition, LeagueError> {
        self.competitions
            .update_competition(competition_id, request)
            .await
    }

    pub async fn delete_competition(&self, competition_id: Uuid) -> Result<(), LeagueError> {
        self.competitions.delete_competition(competition_id).await
    }

    pub async fn register_team(
        &self,
        competition_id: Uuid,
        request: TeamRegistrationRequest,
    ) -> Result<Team, LeagueError> {
        self.teams.register_team(competition_id, request).await
    }

    pub async fn list_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, LeagueError> {
        self.teams.list_teams(competition_id).await
    }

    pub async fn update_team_status(
        &self,
        team_id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Team, LeagueError> {
        self.teams.update_team_status(team_id, status).await
    }

    /// Generate the round-robin schedule of a competition
    pub async fn generate_fixtures(
        &self,
        competition_id: Uuid,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        self.schedule.generate_fixtures(competition_id).await
    }

    pub async fn generate_fixtures_at(
        &self,
        competition_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        self.schedule.generate_fixtures_at(competition_id, now).await
    }

    pub async fn list_fixtures(&self, competition_id: Uuid) -> Result<Vec<Fixture>, LeagueError> {
        self.fixtures.list_fixtures(competition_id).await
    }

    pub async fn upcoming_fixtures(&self, limit: Option<i64>) -> Result<Vec<Fixture>, LeagueError> {
        self.fixtures
            .upcoming_fixtures(limit, self.settings.upcoming_fixtures_limit)
            .await
    }

    pub async fn record_result(
        &self,
        fixture_id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Fixture, LeagueError> {
        self.fixtures
            .record_result(fixture_id, home_score, away_score)
            .await
    }

    pub async fn cancel_fixture(&self, fixture_id: Uuid) -> Result<Fixture, LeagueError> {
        self.fixtures.cancel_fixture(fixture_id).await
    }

    pub async fn reschedule_fixture(
        &self,
        fixture_id: Uuid,
        scheduled_at: Option<DateTime<Utc>>,
        location: Option<String>,
    ) -> Result<Fixture, LeagueError> {
        self.fixtures
            .reschedule_fixture(fixture_id, scheduled_at, location)
            .await
    }

    pub async fn delete_fixture(&self, fixture_id: Uuid) -> Result<(), LeagueError> {
        self.fixtures.delete_fixture(fixture_id).await
    }

    /// Get the standings of every modality in a competition
    pub async fn get_standings(
        &self,
        competition_id: Uuid,
    ) -> Result<CompetitionStandingsResponse, LeagueError> {
        self.standings.get_competition_standings(competition_id).await
    }
}
