use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use interclasse_backend::models::competition::Competition;
use interclasse_backend::models::fixture::{Fixture, FixtureStatus};
use interclasse_backend::models::team::{ApprovalStatus, Team};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn competition(starts_on: NaiveDate, ends_on: NaiveDate) -> Competition {
    let now = Utc::now();
    Competition {
        id: Uuid::new_v4(),
        name: "Interclass Cup".to_string(),
        registration_starts_on: None,
        registration_ends_on: None,
        starts_on,
        ends_on,
        modalities: vec!["futsal".to_string(), "volleyball".to_string()],
        created_at: now,
        updated_at: now,
    }
}

pub fn team(competition_id: Uuid, name: &str, modality: &str, status: ApprovalStatus) -> Team {
    Team {
        id: Uuid::new_v4(),
        competition_id,
        name: name.to_string(),
        modality: modality.to_string(),
        status,
        contact_name: format!("{} captain", name),
        contact_email: format!("{}@school.example.com", name.to_lowercase().replace(' ', ".")),
        created_at: Utc::now(),
    }
}

pub fn approved_teams(competition_id: Uuid, modality: &str, count: usize) -> Vec<Team> {
    (0..count)
        .map(|i| team(competition_id, &format!("{} {}", modality, i + 1), modality, ApprovalStatus::Approved))
        .collect()
}

/// A fixture between two teams with the given outcome.
pub fn played(home: &Team, away: &Team, home_score: Option<i32>, away_score: Option<i32>, status: FixtureStatus) -> Fixture {
    let now = Utc::now();
    Fixture {
        id: Uuid::new_v4(),
        competition_id: home.competition_id,
        modality: home.modality.clone(),
        home_team_id: home.id,
        away_team_id: away.id,
        scheduled_at: Utc.with_ymd_and_hms(2025, 5, 5, 10, 0, 0).unwrap(),
        location: "Main court".to_string(),
        home_score,
        away_score,
        status,
        created_at: now,
        updated_at: now,
    }
}

pub fn completed(home: &Team, away: &Team, home_score: i32, away_score: i32) -> Fixture {
    played(home, away, Some(home_score), Some(away_score), FixtureStatus::Completed)
}
