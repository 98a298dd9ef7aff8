use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::config::settings::LeagueSettings;
use crate::db::{LeagueStore, StoreError};
use crate::models::competition::Competition;
use crate::models::fixture::{Fixture, FixtureStatus, ScheduleOutcome};
use crate::models::team::{group_by_modality, Team};
use crate::services::{Notification, NotificationQueue};

/// Fixtures placed on the same calendar day before moving to the next one.
pub const FIXTURES_PER_DAY: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Competition {0} not found")]
    CompetitionNotFound(Uuid),
    #[error("Fixtures cannot be generated for a competition that has already finished")]
    CompetitionAlreadyFinished,
    #[error("Fixtures already exist for this competition")]
    FixturesAlreadyExist,
    #[error("At least two approved teams are required to generate fixtures (found {0})")]
    InsufficientTeams(usize),
    #[error("Invalid competition period: {starts_on} to {ends_on}")]
    InvalidDateWindow {
        starts_on: NaiveDate,
        ends_on: NaiveDate,
    },
    #[error(
        "Not enough days in the competition period for all fixtures \
         ({required_fixtures} fixtures need {required_days} days, the period has {available_days})"
    )]
    InsufficientSchedulingDays {
        required_fixtures: usize,
        required_days: i64,
        available_days: i64,
        warnings: Vec<String>,
    },
    #[error("{}", no_fixtures_message(.warnings))]
    NoFixturesGenerated { warnings: Vec<String> },
    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

fn no_fixtures_message(warnings: &[String]) -> &'static str {
    if warnings.is_empty() {
        "No fixtures could be generated. Check that at least one modality has two or more approved teams"
    } else {
        "No fixtures were generated because no modality has at least two approved teams. See the warnings for details"
    }
}

impl ScheduleError {
    /// Warnings collected before the failure, if any.
    pub fn warnings(&self) -> &[String] {
        match self {
            ScheduleError::InsufficientSchedulingDays { warnings, .. }
            | ScheduleError::NoFixturesGenerated { warnings } => warnings,
            _ => &[],
        }
    }
}

/// Round-robin fixture planner.
///
/// Pure: it never touches storage, so the same input always yields the same
/// pairings and dates (only fixture ids and timestamps differ).
#[derive(Debug, Clone)]
pub struct Scheduler {
    kickoff: NaiveTime,
    default_location: String,
}

impl Scheduler {
    pub fn new(settings: &LeagueSettings) -> Self {
        Self {
            kickoff: NaiveTime::from_hms_opt(settings.kickoff_hour.min(23), 0, 0)
                .unwrap_or_default(),
            default_location: settings.default_location.clone(),
        }
    }

    /// Number of fixtures a single round robin between `team_count` teams needs.
    pub fn fixture_count(team_count: usize) -> usize {
        if team_count < 2 {
            return 0;
        }
        team_count * (team_count - 1) / 2
    }

    /// Kickoff time for the `day_offset`-th day of the window.
    pub fn match_time(&self, starts_on: NaiveDate, day_offset: i64) -> DateTime<Utc> {
        let day = starts_on + Duration::days(day_offset);
        DateTime::from_naive_utc_and_offset(day.and_time(self.kickoff), Utc)
    }

    /// Plan every fixture for the approved teams of a competition.
    ///
    /// Teams are grouped by modality; each modality with at least two teams
    /// gets a single round robin (`for i, for j > i`). Fixtures are placed two
    /// per day from the first day of the window, across modalities in
    /// generation order. Any fixture that would land after the last day aborts
    /// the whole plan.
    pub fn plan_fixtures(
        &self,
        competition: &Competition,
        teams: &[Team],
        now: DateTime<Utc>,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        let approved: Vec<Team> = teams.iter().filter(|t| t.is_approved()).cloned().collect();
        if approved.len() < 2 {
            return Err(ScheduleError::InsufficientTeams(approved.len()));
        }

        let available_days = competition.window_days();
        if available_days < 1 {
            return Err(ScheduleError::InvalidDateWindow {
                starts_on: competition.starts_on,
                ends_on: competition.ends_on,
            });
        }

        let groups = group_by_modality(&approved);
        let required_fixtures: usize = groups
            .iter()
            .map(|(_, members)| Self::fixture_count(members.len()))
            .sum();

        tracing::info!(
            "Planning {} fixtures for competition {} across {} modalities ({} days available)",
            required_fixtures,
            competition.id,
            groups.len(),
            available_days
        );

        let mut warnings = Vec::new();
        let mut fixtures: Vec<Fixture> = Vec::with_capacity(required_fixtures);

        for (modality, members) in &groups {
            if members.len() < 2 {
                tracing::warn!("Modality '{}' has a single team, skipping", modality);
                warnings.push(format!(
                    "Modality '{}' has fewer than two teams and was skipped",
                    modality
                ));
                continue;
            }

            for i in 0..members.len() {
                for j in (i + 1)..members.len() {
                    let day_offset = (fixtures.len() / FIXTURES_PER_DAY) as i64;
                    if day_offset >= available_days {
                        tracing::warn!(
                            "Competition {} needs more than {} days for {} fixtures",
                            competition.id,
                            available_days,
                            required_fixtures
                        );
                        return Err(ScheduleError::InsufficientSchedulingDays {
                            required_fixtures,
                            required_days: required_fixtures.div_ceil(FIXTURES_PER_DAY) as i64,
                            available_days,
                            warnings,
                        });
                    }

                    let scheduled_at = self.match_time(competition.starts_on, day_offset);
                    tracing::debug!(
                        "Fixture {}: {} vs {} ({}) at {}",
                        fixtures.len() + 1,
                        members[i].name,
                        members[j].name,
                        modality,
                        scheduled_at
                    );

                    fixtures.push(Fixture {
                        id: Uuid::new_v4(),
                        competition_id: competition.id,
                        modality: modality.clone(),
                        home_team_id: members[i].id,
                        away_team_id: members[j].id,
                        scheduled_at,
                        location: self.default_location.clone(),
                        home_score: None,
                        away_score: None,
                        status: FixtureStatus::Pending,
                        created_at: now,
                        updated_at: now,
                    });
                }
            }
        }

        if fixtures.is_empty() {
            return Err(ScheduleError::NoFixturesGenerated { warnings });
        }

        Ok(ScheduleOutcome { fixtures, warnings })
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(&LeagueSettings::default())
    }
}

/// Generates and persists the fixtures of a competition.
pub struct ScheduleService {
    store: Arc<dyn LeagueStore>,
    scheduler: Scheduler,
    notifications: NotificationQueue,
}

impl ScheduleService {
    pub fn new(
        store: Arc<dyn LeagueStore>,
        scheduler: Scheduler,
        notifications: NotificationQueue,
    ) -> Self {
        Self {
            store,
            scheduler,
            notifications,
        }
    }

    pub async fn generate_fixtures(
        &self,
        competition_id: Uuid,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        self.generate_fixtures_at(competition_id, Utc::now()).await
    }

    /// Generate the full schedule as of `now`.
    ///
    /// Refuses to run twice for the same competition. Either every fixture is
    /// stored or none is. Team contacts are notified after the insert; a
    /// notification problem never fails the call.
    pub async fn generate_fixtures_at(
        &self,
        competition_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<ScheduleOutcome, ScheduleError> {
        let competition = self
            .store
            .get_competition(competition_id)
            .await?
            .ok_or(ScheduleError::CompetitionNotFound(competition_id))?;

        if competition.is_finished(now.date_naive()) {
            return Err(ScheduleError::CompetitionAlreadyFinished);
        }

        let existing = self.store.list_fixtures(competition_id).await?;
        if !existing.is_empty() {
            tracing::warn!(
                "Competition {} already has {} fixtures",
                competition_id,
                existing.len()
            );
            return Err(ScheduleError::FixturesAlreadyExist);
        }

        let teams = self.store.list_approved_teams(competition_id).await?;
        let outcome = self.scheduler.plan_fixtures(&competition, &teams, now)?;

        match self
            .store
            .insert_fixtures(competition_id, &outcome.fixtures)
            .await
        {
            Ok(()) => {}
            // Another generation won the race between our check and insert.
            Err(StoreError::Conflict(reason)) => {
                tracing::warn!("Fixture insert rejected: {}", reason);
                return Err(ScheduleError::FixturesAlreadyExist);
            }
            Err(StoreError::NotFound { .. }) => {
                return Err(ScheduleError::CompetitionNotFound(competition_id));
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(
            "✅ Generated {} fixtures for competition '{}' ({} warnings)",
            outcome.fixtures.len(),
            competition.name,
            outcome.warnings.len()
        );

        self.notify_teams(&competition, &teams, &outcome.fixtures);

        Ok(outcome)
    }

    /// Only teams that were given at least one fixture hear about the schedule.
    fn notify_teams(&self, competition: &Competition, teams: &[Team], fixtures: &[Fixture]) {
        for team in teams.iter().filter(|t| fixtures.iter().any(|f| f.involves(t.id))) {
            self.notifications.enqueue(Notification {
                contact: team.contact_email.clone(),
                subject: format!("Fixtures for {} have been scheduled", competition.name),
                body: format!(
                    "<p>Hello {},</p>\
                     <p>The fixtures of {} have been scheduled.</p>\
                     <p>Sign in to see the dates of {}'s matches.</p>",
                    team.contact_name, competition.name, team.name
                ),
            });
        }
    }
}
