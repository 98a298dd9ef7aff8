use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::store::{CompetitionStore, FixtureStore, StoreError, TeamStore};
use crate::models::competition::Competition;
use crate::models::fixture::{Fixture, FixtureStatus, FixtureTransitionError};
use crate::models::team::{ApprovalStatus, Team};

const FIXTURE_COLUMNS: &str = r#"
    id, competition_id, modality, home_team_id, away_team_id, scheduled_at,
    location, home_score, away_score, status, created_at, updated_at
"#;

const COMPETITION_COLUMNS: &str = r#"
    id, name, registration_starts_on, registration_ends_on,
    starts_on, ends_on, modalities, created_at, updated_at
"#;

const TEAM_COLUMNS: &str = r#"
    id, competition_id, name, modality, status, contact_name, contact_email, created_at
"#;

/// Postgres-backed store.
#[derive(Debug, Clone)]
pub struct PgLeagueStore {
    pool: PgPool,
}

impl PgLeagueStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Explain why a guarded fixture update touched no row.
    async fn refused_transition(&self, id: Uuid, to: FixtureStatus) -> StoreError {
        let status: Result<Option<String>, sqlx::Error> =
            sqlx::query_scalar("SELECT status FROM fixtures WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await;

        match status {
            Ok(Some(status)) => match FixtureStatus::try_from(status) {
                Ok(from) => FixtureTransitionError { from, to }.into(),
                Err(e) => StoreError::InvalidData(e),
            },
            Ok(None) => fixture_not_found(id),
            Err(e) => e.into(),
        }
    }
}

fn competition_from_row(row: &PgRow) -> Competition {
    Competition {
        id: row.get("id"),
        name: row.get("name"),
        registration_starts_on: row.get("registration_starts_on"),
        registration_ends_on: row.get("registration_ends_on"),
        starts_on: row.get("starts_on"),
        ends_on: row.get("ends_on"),
        modalities: row.get("modalities"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn team_from_row(row: &PgRow) -> Result<Team, StoreError> {
    Ok(Team {
        id: row.get("id"),
        competition_id: row.get("competition_id"),
        name: row.get("name"),
        modality: row.get("modality"),
        status: ApprovalStatus::try_from(row.get::<String, _>("status"))
            .map_err(StoreError::InvalidData)?,
        contact_name: row.get("contact_name"),
        contact_email: row.get("contact_email"),
        created_at: row.get("created_at"),
    })
}

fn fixture_from_row(row: &PgRow) -> Result<Fixture, StoreError> {
    Ok(Fixture {
        id: row.get("id"),
        competition_id: row.get("competition_id"),
        modality: row.get("modality"),
        home_team_id: row.get("home_team_id"),
        away_team_id: row.get("away_team_id"),
        scheduled_at: row.get("scheduled_at"),
        location: row.get("location"),
        home_score: row.get("home_score"),
        away_score: row.get("away_score"),
        status: FixtureStatus::try_from(row.get::<String, _>("status"))
            .map_err(StoreError::InvalidData)?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn status_names(statuses: &[FixtureStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

fn fixture_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound { entity: "Fixture", id }
}

#[async_trait]
impl CompetitionStore for PgLeagueStore {
    async fn get_competition(&self, id: Uuid) -> Result<Option<Competition>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM competitions WHERE id = $1",
            COMPETITION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(competition_from_row))
    }

    async fn list_competitions(&self) -> Result<Vec<Competition>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM competitions ORDER BY starts_on DESC, created_at DESC",
            COMPETITION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(competition_from_row).collect())
    }

    async fn insert_competition(&self, competition: &Competition) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO competitions (
                id, name, registration_starts_on, registration_ends_on,
                starts_on, ends_on, modalities, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(competition.id)
        .bind(&competition.name)
        .bind(competition.registration_starts_on)
        .bind(competition.registration_ends_on)
        .bind(competition.starts_on)
        .bind(competition.ends_on)
        .bind(&competition.modalities)
        .bind(competition.created_at)
        .bind(competition.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_competition(&self, competition: &Competition) -> Result<Competition, StoreError> {
        let mut tx = self.pool.begin().await?;

        // Same row lock as fixture generation, so the window check cannot race it.
        let current = sqlx::query(
            "SELECT starts_on, ends_on FROM competitions WHERE id = $1 FOR UPDATE",
        )
        .bind(competition.id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::NotFound {
            entity: "Competition",
            id: competition.id,
        })?;

        let starts_on: chrono::NaiveDate = current.get("starts_on");
        let ends_on: chrono::NaiveDate = current.get("ends_on");
        if starts_on != competition.starts_on || ends_on != competition.ends_on {
            let fixtures: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM fixtures WHERE competition_id = $1")
                    .bind(competition.id)
                    .fetch_one(&mut *tx)
                    .await?;
            if fixtures > 0 {
                return Err(StoreError::Conflict(format!(
                    "competition {} already has {} fixtures",
                    competition.id, fixtures
                )));
            }
        }

        let row = sqlx::query(&format!(
            r#"
            UPDATE competitions
            SET name = $2, registration_starts_on = $3, registration_ends_on = $4,
                starts_on = $5, ends_on = $6, modalities = $7, updated_at = $8
            WHERE id = $1
            RETURNING {}
            "#,
            COMPETITION_COLUMNS
        ))
        .bind(competition.id)
        .bind(&competition.name)
        .bind(competition.registration_starts_on)
        .bind(competition.registration_ends_on)
        .bind(competition.starts_on)
        .bind(competition.ends_on)
        .bind(&competition.modalities)
        .bind(competition.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(competition_from_row(&row))
    }

    async fn delete_competition(&self, id: Uuid) -> Result<bool, StoreError> {
        // Teams and fixtures go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM competitions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted competition {} with its teams and fixtures", id);
        }
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TeamStore for PgLeagueStore {
    async fn list_approved_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM teams WHERE competition_id = $1 AND status = 'approved' ORDER BY created_at, id",
            TEAM_COLUMNS
        ))
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(team_from_row).collect()
    }

    async fn list_teams(&self, competition_id: Uuid) -> Result<Vec<Team>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM teams WHERE competition_id = $1 ORDER BY created_at, id",
            TEAM_COLUMNS
        ))
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(team_from_row).collect()
    }

    async fn insert_team(&self, team: &Team) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO teams (
                id, competition_id, name, modality, status,
                contact_name, contact_email, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(team.id)
        .bind(team.competition_id)
        .bind(&team.name)
        .bind(&team.modality)
        .bind(team.status.as_str())
        .bind(&team.contact_name)
        .bind(&team.contact_email)
        .bind(team.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_team_status(
        &self,
        id: Uuid,
        status: ApprovalStatus,
    ) -> Result<Team, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE teams SET status = $2
            WHERE id = $1
              AND ($2 = 'approved' OR NOT EXISTS (
                  SELECT 1 FROM fixtures WHERE home_team_id = $1 OR away_team_id = $1
              ))
            RETURNING {}
            "#,
            TEAM_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(row) = row {
            return team_from_row(&row);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM teams WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if exists {
            Err(StoreError::Conflict(format!("team {} already has fixtures", id)))
        } else {
            Err(StoreError::NotFound { entity: "Team", id })
        }
    }
}

#[async_trait]
impl FixtureStore for PgLeagueStore {
    async fn list_fixtures(&self, competition_id: Uuid) -> Result<Vec<Fixture>, StoreError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM fixtures WHERE competition_id = $1 ORDER BY scheduled_at, created_at",
            FIXTURE_COLUMNS
        ))
        .bind(competition_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(fixture_from_row).collect()
    }

    async fn get_fixture(&self, id: Uuid) -> Result<Option<Fixture>, StoreError> {
        let row = sqlx::query(&format!("SELECT {} FROM fixtures WHERE id = $1", FIXTURE_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(fixture_from_row).transpose()
    }

    async fn insert_fixtures(
        &self,
        competition_id: Uuid,
        fixtures: &[Fixture],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent generations for the same competition.
        let locked = sqlx::query("SELECT id FROM competitions WHERE id = $1 FOR UPDATE")
            .bind(competition_id)
            .fetch_optional(&mut *tx)
            .await?;
        if locked.is_none() {
            return Err(StoreError::NotFound {
                entity: "Competition",
                id: competition_id,
            });
        }

        let existing: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM fixtures WHERE competition_id = $1")
                .bind(competition_id)
                .fetch_one(&mut *tx)
                .await?;
        if existing > 0 {
            return Err(StoreError::Conflict(format!(
                "competition {} already has {} fixtures",
                competition_id, existing
            )));
        }

        for fixture in fixtures {
            debug!(
                "Inserting fixture {} ({}): {} vs {} at {}",
                fixture.id,
                fixture.modality,
                fixture.home_team_id,
                fixture.away_team_id,
                fixture.scheduled_at
            );

            sqlx::query(
                r#"
                INSERT INTO fixtures (
                    id, competition_id, modality, home_team_id, away_team_id,
                    scheduled_at, location, home_score, away_score, status,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                "#,
            )
            .bind(fixture.id)
            .bind(fixture.competition_id)
            .bind(&fixture.modality)
            .bind(fixture.home_team_id)
            .bind(fixture.away_team_id)
            .bind(fixture.scheduled_at)
            .bind(&fixture.location)
            .bind(fixture.home_score)
            .bind(fixture.away_score)
            .bind(fixture.status.as_str())
            .bind(fixture.created_at)
            .bind(fixture.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!(
            "Inserted {} fixtures for competition {}",
            fixtures.len(),
            competition_id
        );

        Ok(())
    }

    async fn update_fixture_result(
        &self,
        id: Uuid,
        home_score: i32,
        away_score: i32,
    ) -> Result<Fixture, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE fixtures
            SET home_score = $2, away_score = $3, status = 'completed', updated_at = NOW()
            WHERE id = $1 AND status = ANY($4)
            RETURNING {}
            "#,
            FIXTURE_COLUMNS
        ))
        .bind(id)
        .bind(home_score)
        .bind(away_score)
        .bind(status_names(FixtureStatus::sources_of(FixtureStatus::Completed)))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => fixture_from_row(&row),
            None => Err(self.refused_transition(id, FixtureStatus::Completed).await),
        }
    }

    async fn update_fixture_status(
        &self,
        id: Uuid,
        status: FixtureStatus,
    ) -> Result<Fixture, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE fixtures SET status = $2, updated_at = NOW()
            WHERE id = $1 AND status = ANY($3)
            RETURNING {}
            "#,
            FIXTURE_COLUMNS
        ))
        .bind(id)
        .bind(status.as_str())
        .bind(status_names(FixtureStatus::sources_of(status)))
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => fixture_from_row(&row),
            None => Err(self.refused_transition(id, status).await),
        }
    }

    async fn update_fixture_schedule(
        &self,
        id: Uuid,
        scheduled_at: DateTime<Utc>,
        location: &str,
    ) -> Result<Fixture, StoreError> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE fixtures
            SET scheduled_at = $2, location = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            FIXTURE_COLUMNS
        ))
        .bind(id)
        .bind(scheduled_at)
        .bind(location)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref()
            .map(fixture_from_row)
            .transpose()?
            .ok_or_else(|| fixture_not_found(id))
    }

    async fn delete_fixture(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM fixtures WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_upcoming_fixtures(
        &self,
        after: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Fixture>, StoreError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {} FROM fixtures
            WHERE status = 'pending' AND scheduled_at > $1
            ORDER BY scheduled_at ASC
            LIMIT $2
            "#,
            FIXTURE_COLUMNS
        ))
        .bind(after)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(fixture_from_row).collect()
    }
}
