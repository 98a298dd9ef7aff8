// src/models/standings.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One team's line in a modality table. Derived from completed fixtures on
/// every request; never persisted.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StandingRow {
    pub team_id: Uuid,
    pub team_name: String,
    pub points: u32,
    pub games_played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
}

impl StandingRow {
    pub fn new(team_id: Uuid, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            points: 0,
            games_played: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StandingEntry {
    pub position: u32,
    #[serde(flatten)]
    pub row: StandingRow,
    pub goal_difference: i64,
}

impl StandingEntry {
    pub fn new(position: u32, row: StandingRow) -> Self {
        let goal_difference = row.goal_difference();
        Self {
            position,
            row,
            goal_difference,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ModalityStandings {
    pub modality: String,
    pub standings: Vec<StandingEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CompetitionStandingsResponse {
    pub competition_id: Uuid,
    pub modalities: Vec<ModalityStandings>,
}
