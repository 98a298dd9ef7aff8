use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::store::{CompetitionStore, FixtureStore, StoreError, TeamStore};
use crate::models::competition::Competition;
use crate::models::fixture::{Fixture, FixtureStatus};
use crate::models::team::{ApprovalStatus, Team};

#[derive(Debug, Default)]
struct Tables {
    competitions: HashMap<Uuid, Competition>,
    // Vecs keep insertion order, which doubles as registration order.
    teams: Vec<Team>,
    fixtures: Vec<Fixture>,
}

/// Process-local store used for local runs and the test-suite.
#[derive(Debug, Default)]
pub struct InMemoryLeagueStore {
    tables: RwLock<Tables>,
}

impl InMemoryLeagueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn fixture_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound { entity: "Fixture", id }
}

#[async_trait]
impl CompetitionStore for InMemoryLeagueStore {
    async fn get_competition(&self, id: Uuid) -> Result<Option<Competition>, StoreError> {
        Ok(self.tables.read().await.competitions.get(&id).cloned())
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>, StoreError> {
        let mut competitions: Vec<Competition> =
            self.tables.read().await.competitions.values().cloned().collect();
        competitions.sort_by(|a, b| {
            b.starts_on
                .cmp(&a.starts_on)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(competitions)
    }

    async fn insert_competition(&self, competition: &Competition) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if tables.competitions.contains_key(&competition.id) {
            return Err(StoreError::Conflict(format!(
                "competition {} already exists",
                competition.id
            )));
        }
        tables.competitions.insert(competition.id, competition.clone());
        Ok(())
    }

    async fn update_competition(&self, competition: &Competition) -> Result<Competition, StoreError> {
        let mut tables = self.tables.write().await;
        let has_fixtures = tables
            .fixtures
            .iter()
            .any(|f| f.competition_id == competition.id);
        let stored = tables
            .competitions
            .get_mut(&competition.id)
            .ok_or(StoreError::NotFound {
                entity: "Competition",
                id: competition.id,
            })?;

        let window_changed =
            stored.starts_on != competition.starts_on || stored.ends_on != competition.ends_on;
        if window_changed && has_fixtures {
            return Err(StoreError::Conflict(format!(
                "competition {} already has fixtures",
                competition.id
            )));
        }

        stored.name = competition.name.clone();
        stored.registration_starts_on = competition.registration_starts_on;
        stored.registration_ends_on = competition.registration_ends_on;
        stored.starts_on = competition.starts_on;
        stored.ends_on = competition.ends_on;
        stored.modalities = competition.modalities.clone();
        stored.updated_at = competition.updated_at;
        Ok(stored.clone())
    }

    async fn delete_competition(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.competitions.remove(&id).is_none() {
            return Ok(false);
        }
        tables.fixtures.retain(|f| f.competition_id != id);
        tables.teams.retain(|t| t.competition_id != id);
        Ok(true)
    }
}

#[async_trait]
impl TeamStore for InMemoryLeagueStore {
    async fn list_approved_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .teams
            .iter()
            .filter(|t| t.competition_id == competition_id && t.is_approved())
            .cloned()
            .collect())
    }

    async fn list_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, StoreError> {
        Ok(self
            .tables
            .read()
            .await
            .teams
            .iter()
            .filter(|t| t.competition_id == competition_id)
            .cloned()
            .collect())
    }

    async fn insert_team(&self, team: &Team) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.competitions.contains_key(&team.competition_id) {
            return Err(StoreError::NotFound {
                entity: "Competition",
                id: team.competition_id,
            });
        }
        tables.teams.push(team.clone());
        Ok(())
    }

    async fn update_team_status(
        &self,
        id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Team, StoreError> {
        let mut tables = self.tables.write().await;
        let has_fixtures = tables.fixtures.iter().any(|f| f.involves(id));
        let team = tables
            .teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound { entity: "Team", id })?;
        if has_fixtures && status != ApprovalStatus::Approved {
            return Err(StoreError::Conflict(format!("team {} already has fixtures", id)));
        }
        team.status = status;
        Ok(team.clone())
    }
}

#[async_trait]
impl FixtureStore for InMemoryLeagueStore {
    async fn list_fixtures(&self, competition_id: Uuid) -> Result<Vec<Fixture>, StoreError> {
        let mut fixtures: Vec<Fixture> = self
            .tables
            .read()
            .await
            .fixtures
            .iter()
            .filter(|f| f.competition_id == competition_id)
            .cloned()
            .collect();
        fixtures.sort_by_key(|f| f.scheduled_at);
        Ok(fixtures)
    }

    async fn get_fixture(&self, id: Uuid) -> Result<Option<Fixture>, StoreError> {
        Ok(self.tables.read().await.fixtures.iter().find(|f| f.id == id).cloned())
    }

    async fn insert_fixtures(
        &self,
        competition_id: Uuid,
        fixtures: &[Fixture],
    ) -> Result<(), StoreError> {
        // Held for the check and the insert so concurrent generations serialize.
        let mut tables = self.tables.write().await;
        if tables
            .fixtures
            .iter()
            .any(|f| f.competition_id == competition_id)
        {
            return Err(StoreError::Conflict(format!(
                "competition {} already has fixtures",
                competition_id
            )));
        }
        tables.fixtures.extend(fixtures.iter().cloned());
        Ok(())
    }

    async fn update_fixture_result(
        &self,
        id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Fixture, StoreError> {
        let mut tables = self.tables.write().await;
        let fixture = tables
            .fixtures
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| fixture_not_found(id))?;
        fixture.ensure_can_record_result()?;
        fixture.home_score = Some(home_score);
        fixture.away_score = Some(away_score);
        fixture.status = FixtureStatus::Completed;
        fixture.updated_at = Utc::now();
        Ok(fixture.clone())
    }

    async fn update_fixture_status(
        &self,
        id: Uuid,
        status: FixtureStatus,
    ) -> Result<Fixture, StoreError> {
        let mut tables = self.tables.write().await;
        let fixture = tables
            .fixtures
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| fixture_not_found(id))?;
        fixture.ensure_can_move_to(status)?;
        fixture.status = status;
        fixture.updated_at = Utc::now();
        Ok(fixture.clone())
    }

    async fn update_fixture_schedule(
        &self,
        id: Uuid,
        scheduled_at: DateTime<Utc>,
        location: &str,
    ) -> Result<Fixture, StoreError> {
        let mut tables = self.tables.write().await;
        let fixture = tables
            .fixtures
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| fixture_not_found(id))?;
        fixture.scheduled_at = scheduled_at;
        fixture.location = location.to_string();
        fixture.updated_at = Utc::now();
        Ok(fixture.clone())
    }

    async fn delete_fixture(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.fixtures.len();
        tables.fixtures.retain(|f| f.id != id);
        Ok(tables.fixtures.len() != before)
    }

    async fn list_upcoming_fixtures(
        &self,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Fixture>, StoreError> {
        let mut upcoming: Vec<Fixture> = self
            .tables
            .read()
            .await
            .fixtures
            .iter()
            .filter(|f| f.status == FixtureStatus::Pending && f.scheduled_at > after)
            .cloned()
            .collect();
        upcoming.sort_by_key(|f| f.scheduled_at);
        upcoming.truncate(limit.max(0) as usize);
        Ok(upcoming)
    }
}
