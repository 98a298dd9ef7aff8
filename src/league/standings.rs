use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::db::LeagueStore;
use crate::league::error::LeagueError;
use crate::models::fixture::Fixture;
use crate::models::standings::{
    CompetitionStandingsResponse, ModalityStandings, StandingEntry, StandingRow,
};
use crate::models::team::{group_by_modality, modality_key, Team};

pub const POINTS_FOR_WIN: u32 = 3;
pub const POINTS_FOR_DRAW: u32 = 1;

/// Build the table for one modality.
///
/// Only completed fixtures with both scores count, and only when both teams
/// are among `teams`. Every team gets a row, even without games. Rows are
/// ordered by points, then goal difference, then goals scored; teams still
/// level keep their input order (no further tie-break is defined).
pub fn compute_standings(teams: &[Team], fixtures: &[Fixture]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = teams
        .iter()
        .map(|team| StandingRow::new(team.id, team.name.clone()))
        .collect();
    let index: HashMap<Uuid, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, team)| (team.id, i))
        .collect();

    for fixture in fixtures {
        let Some((home_score, away_score)) = fixture.decided_score() else {
            continue;
        };
        let (Some(&home), Some(&away)) = (
            index.get(&fixture.home_team_id),
            index.get(&fixture.away_team_id),
        ) else {
            tracing::debug!(
                "Skipping fixture {}: a team is not part of this table",
                fixture.id
            );
            continue;
        };
        if home == away {
            continue;
        }

        // Scores are validated non-negative before they are stored.
        let home_goals = home_score.max(0) as u32;
        let away_goals = away_score.max(0) as u32;

        record(&mut rows[home], home_goals, away_goals);
        record(&mut rows[away], away_goals, home_goals);
    }

    rows.sort_by(compare_rows);
    rows
}

fn record(row: &mut StandingRow, scored: u32, conceded: u32) {
    row.games_played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;

    match scored.cmp(&conceded) {
        Ordering::Greater => {
            row.wins += 1;
            row.points += POINTS_FOR_WIN;
        }
        Ordering::Equal => {
            row.draws += 1;
            row.points += POINTS_FOR_DRAW;
        }
        Ordering::Less => row.losses += 1,
    }
}

fn compare_rows(a: &StandingRow, b: &StandingRow) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

/// One table per modality, in the order modalities first appear in `teams`.
pub fn compute_competition_standings(
    teams: &[Team],
    fixtures: &[Fixture],
) -> Vec<ModalityStandings> {
    group_by_modality(teams)
        .into_iter()
        .map(|(modality, members)| {
            let members: Vec<Team> = members.into_iter().cloned().collect();
            let modality_fixtures: Vec<Fixture> = fixtures
                .iter()
                .filter(|f| modality_key(&f.modality) == modality)
                .cloned()
                .collect();

            let standings = compute_standings(&members, &modality_fixtures)
                .into_iter()
                .enumerate()
                .map(|(i, row)| StandingEntry::new((i + 1) as u32, row))
                .collect();

            ModalityStandings {
                modality,
                standings,
            }
        })
        .collect()
}

/// Read-only standings view over the stored fixtures.
pub struct StandingsService {
    store: Arc<dyn LeagueStore>,
}

impl StandingsService {
    pub fn new(store: Arc<dyn LeagueStore>) -> Self {
        Self { store }
    }

    /// Recompute every modality table of a competition from its fixtures.
    pub async fn get_competition_standings(
        &self,
        competition_id: Uuid,
    ) -> Result<CompetitionStandingsResponse, LeagueError> {
        self.store
            .get_competition(competition_id)
            .await?
            .ok_or(LeagueError::CompetitionNotFound(competition_id))?;

        let teams = self.store.list_approved_teams(competition_id).await?;
        let fixtures = self.store.list_fixtures(competition_id).await?;
        let modalities = compute_competition_standings(&teams, &fixtures);

        tracing::debug!(
            "Computed standings for competition {}: {} teams, {} fixtures, {} modalities",
            competition_id,
            teams.len(),
            fixtures.len(),
            modalities.len()
        );

        Ok(CompetitionStandingsResponse {
            competition_id,
            modalities,
        })
    }
}
