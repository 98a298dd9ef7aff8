// src/models/fixture.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Fixture {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub modality: String,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub location: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: FixtureStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fixture {
    /// Both scores, when the fixture is completed and fully scored.
    pub fn decided_score(&self) -> Option<(i32, i32)> {
        if self.status != FixtureStatus::Completed {
            return None;
        }
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => Some((home, away)),
            _ => None,
        }
    }

    pub fn involves(&self, team_id: Uuid) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    /// Result entry is allowed while pending, and again while completed
    /// (corrections overwrite the previous score).
    pub fn ensure_can_record_result(&self) -> Result<(), FixtureTransitionError> {
        self.ensure_can_move_to(FixtureStatus::Completed)
    }

    pub fn ensure_can_cancel(&self) -> Result<(), FixtureTransitionError> {
        self.ensure_can_move_to(FixtureStatus::Cancelled)
    }

    pub fn ensure_can_move_to(&self, to: FixtureStatus) -> Result<(), FixtureTransitionError> {
        if FixtureStatus::sources_of(to).contains(&self.status) {
            Ok(())
        } else {
            Err(FixtureTransitionError {
                from: self.status,
                to,
            })
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Pending,
    Completed,
    Cancelled,
}

impl FixtureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureStatus::Pending => "pending",
            FixtureStatus::Completed => "completed",
            FixtureStatus::Cancelled => "cancelled",
        }
    }

    /// Statuses from which a fixture may move to `to`. Cancelled is terminal.
    pub fn sources_of(to: FixtureStatus) -> &'static [FixtureStatus] {
        match to {
            FixtureStatus::Completed => &[FixtureStatus::Pending, FixtureStatus::Completed],
            FixtureStatus::Cancelled => &[FixtureStatus::Pending],
            FixtureStatus::Pending => &[FixtureStatus::Pending],
        }
    }
}

impl TryFrom<String> for FixtureStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("{} is not a known fixture status", other)),
        }
    }
}

impl fmt::Display for FixtureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Fixture cannot move from {from} to {to}")]
pub struct FixtureTransitionError {
    pub from: FixtureStatus,
    pub to: FixtureStatus,
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize)]
pub struct FixtureResultRequest {
    pub home_score: i32,
    pub away_score: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RescheduleFixtureRequest {
    pub scheduled_at: Option<DateTime<Utc>>,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpcomingFixturesQuery {
    pub limit: Option<i64>,
}

impl fmt::Display for UpcomingFixturesQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "limit: {:?}", self.limit)
    }
}

/// Result of a successful schedule generation.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScheduleOutcome {
    pub fixtures: Vec<Fixture>,
    pub warnings: Vec<String>,
}
