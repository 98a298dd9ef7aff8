// src/models/competition.rs
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    pub registration_starts_on: Option<NaiveDate>,
    pub registration_ends_on: Option<NaiveDate>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub modalities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    /// A competition is finished once the whole of its last day has passed.
    pub fn is_finished(&self, today: NaiveDate) -> bool {
        today > self.ends_on
    }

    /// Number of calendar days in the competition window, both ends included.
    pub fn window_days(&self) -> i64 {
        (self.ends_on - self.starts_on).num_days() + 1
    }
}

// Request/Response DTOs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CreateCompetitionRequest {
    pub name: String,
    pub registration_starts_on: Option<NaiveDate>,
    pub registration_ends_on: Option<NaiveDate>,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    #[serde(default)]
    pub modalities: Vec<String>,
}

/// Edits carry the same fields as creation and replace them all.
pub type UpdateCompetitionRequest = CreateCompetitionRequest;
