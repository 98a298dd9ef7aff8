// src/models/team.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Modality used for teams registered without one.
pub const UNSPECIFIED_MODALITY: &str = "unspecified";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Team {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub modality: String,
    pub status: ApprovalStatus,
    pub contact_name: String,
    pub contact_email: String,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Modality key used for grouping; blank tags fall into their own bucket.
    pub fn modality_key(&self) -> &str {
        modality_key(&self.modality)
    }

    pub fn is_approved(&self) -> bool {
        self.status == ApprovalStatus::Approved
    }
}

pub fn modality_key(modality: &str) -> &str {
    let trimmed = modality.trim();
    if trimmed.is_empty() {
        UNSPECIFIED_MODALITY
    } else {
        trimmed
    }
}

/// Groups teams by modality. Modalities keep the order in which they are first
/// seen and teams keep their input order inside each group.
pub fn group_by_modality(teams: &[Team]) -> Vec<(String, Vec<&Team>)> {
    let mut groups: Vec<(String, Vec<&Team>)> = Vec::new();
    for team in teams {
        let key = team.modality_key();
        match groups.iter_mut().find(|(modality, _)| modality == key) {
            Some((_, members)) => members.push(team),
            None => groups.push((key.to_string(), vec![team])),
        }
    }
    groups
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Pending => "pending",
            ApprovalStatus::Approved => "approved",
            ApprovalStatus::Rejected => "rejected",
        }
    }
}

impl TryFrom<String> for ApprovalStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("{} is not a known approval status", other)),
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request to register a new team in a competition
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamRegistrationRequest {
    pub name: String,
    #[serde(default)]
    pub modality: String,
    pub contact_name: String,
    pub contact_email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TeamStatusRequest {
    pub status: ApprovalStatus,
}
