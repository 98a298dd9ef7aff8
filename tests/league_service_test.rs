use chrono::{NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use interclasse_backend::db::{FixtureStore, TeamStore};
use interclasse_backend::league::{LeagueError, LeagueService, ScheduleError};
use interclasse_backend::models::competition::CreateCompetitionRequest;
use interclasse_backend::models::team::{ApprovalStatus, Team, TeamRegistrationRequest};

mod common;
use common::fixtures::date;
use common::utils::{spawn_service, wait_for_notifications};

fn competition_request(starts_on: NaiveDate, ends_on: NaiveDate) -> CreateCompetitionRequest {
    CreateCompetitionRequest {
        name: "Interclass Cup".to_string(),
        registration_starts_on: None,
        registration_ends_on: None,
        starts_on,
        ends_on,
        modalities: vec!["futsal".to_string()],
    }
}

fn registration(name: &str, modality: &str) -> TeamRegistrationRequest {
    TeamRegistrationRequest {
        name: name.to_string(),
        modality: modality.to_string(),
        contact_name: format!("{} captain", name),
        contact_email: format!("{}@school.example.com", name.to_lowercase()),
    }
}

async fn register_approved(
    service: &LeagueService,
    competition_id: Uuid,
    names: &[&str],
    modality: &str,
) -> Vec<Team> {
    let mut teams = Vec::new();
    for name in names {
        let team = service
            .register_team(competition_id, registration(name, modality))
            .await
            .expect("Failed to register team");
        let team = service
            .update_team_status(team.id, ApprovalStatus::Approved)
            .await
            .expect("Failed to approve team");
        teams.push(team);
    }
    teams
}

#[tokio::test]
async fn test_create_and_get_competition() {
    let (service, _store, _notifier) = spawn_service();

    let created = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    let fetched = service.get_competition(created.id).await.unwrap();

    assert_eq!(created, fetched);
    assert_eq!(fetched.modalities, vec!["futsal"]);

    let missing = service.get_competition(Uuid::new_v4()).await;
    assert!(matches!(missing, Err(LeagueError::CompetitionNotFound(_))));
}

#[tokio::test]
async fn test_create_competition_rejects_backwards_window() {
    let (service, _store, _notifier) = spawn_service();

    let result = service
        .create_competition(competition_request(date(2025, 5, 16), date(2025, 5, 5)))
        .await;

    assert!(matches!(result, Err(LeagueError::Validation(_))));
}

#[tokio::test]
async fn test_registered_teams_start_pending() {
    let (service, _store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();

    let team = service
        .register_team(competition.id, registration("Falcons", "futsal"))
        .await
        .unwrap();

    assert_eq!(team.status, ApprovalStatus::Pending);
    assert_eq!(team.competition_id, competition.id);
    let teams = service.list_teams(competition.id).await.unwrap();
    assert_eq!(teams, vec![team]);

    let unknown = service
        .register_team(Uuid::new_v4(), registration("Ghosts", "futsal"))
        .await;
    assert!(matches!(unknown, Err(LeagueError::CompetitionNotFound(_))));
}

#[tokio::test]
async fn test_team_status_change_notifies_contact() {
    let (service, _store, notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    let team = service
        .register_team(competition.id, registration("Falcons", "futsal"))
        .await
        .unwrap();

    let updated = service
        .update_team_status(team.id, ApprovalStatus::Rejected)
        .await
        .unwrap();
    assert_eq!(updated.status, ApprovalStatus::Rejected);

    let sent = wait_for_notifications(&notifier, 1).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].contact, "falcons@school.example.com");
    assert!(sent[0].body.contains("rejected"));

    let missing = service
        .update_team_status(Uuid::new_v4(), ApprovalStatus::Approved)
        .await;
    assert!(matches!(missing, Err(LeagueError::TeamNotFound(_))));
}

#[tokio::test]
async fn test_generate_fixtures_persists_and_notifies() {
    let (service, _store, notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    let teams = register_approved(&service, competition.id, &["Falcons", "Hawks", "Owls"], "futsal").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

    let outcome = service.generate_fixtures_at(competition.id, now).await.unwrap();

    assert_eq!(outcome.fixtures.len(), 3);
    let stored = service.list_fixtures(competition.id).await.unwrap();
    assert_eq!(stored.len(), 3);

    // Three approvals plus one schedule notice per approved team
    let sent = wait_for_notifications(&notifier, teams.len() * 2).await;
    let schedule_notices: Vec<_> = sent
        .iter()
        .filter(|n| n.subject.contains("scheduled"))
        .collect();
    assert_eq!(schedule_notices.len(), teams.len());
    for team in &teams {
        assert!(schedule_notices.iter().any(|n| n.contact == team.contact_email));
    }
}

#[tokio::test]
async fn test_generate_fixtures_twice_is_rejected() {
    let (service, store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    register_approved(&service, competition.id, &["Falcons", "Hawks", "Owls", "Bears"], "futsal").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

    service.generate_fixtures_at(competition.id, now).await.unwrap();
    let count_after_first = store.list_fixtures(competition.id).await.unwrap().len();

    let second = service.generate_fixtures_at(competition.id, now).await;

    assert!(matches!(second, Err(ScheduleError::FixturesAlreadyExist)));
    assert_eq!(store.list_fixtures(competition.id).await.unwrap().len(), count_after_first);
    assert_eq!(count_after_first, 6);
}

#[tokio::test]
async fn test_concurrent_generation_stores_one_schedule() {
    let (service, store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    register_approved(&service, competition.id, &["Falcons", "Hawks", "Owls"], "futsal").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

    let (first, second) = tokio::join!(
        service.generate_fixtures_at(competition.id, now),
        service.generate_fixtures_at(competition.id, now)
    );

    assert!(first.is_ok() != second.is_ok(), "Exactly one generation must win");
    assert_eq!(store.list_fixtures(competition.id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_generate_fixtures_for_finished_competition() {
    let (service, _store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    register_approved(&service, competition.id, &["Falcons", "Hawks"], "futsal").await;

    // The last day itself still counts as running
    let last_day = Utc.with_ymd_and_hms(2025, 5, 16, 20, 0, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2025, 5, 17, 0, 0, 1).unwrap();

    let result = service.generate_fixtures_at(competition.id, after).await;
    assert!(matches!(result, Err(ScheduleError::CompetitionAlreadyFinished)));
    assert!(service.list_fixtures(competition.id).await.unwrap().is_empty());

    assert!(service.generate_fixtures_at(competition.id, last_day).await.is_ok());
}

#[tokio::test]
async fn test_generate_fixtures_for_unknown_competition() {
    let (service, _store, _notifier) = spawn_service();

    let result = service.generate_fixtures(Uuid::new_v4()).await;

    assert!(matches!(result, Err(ScheduleError::CompetitionNotFound(_))));
}

#[tokio::test]
async fn test_generate_fixtures_ignores_unapproved_teams() {
    let (service, _store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    register_approved(&service, competition.id, &["Falcons"], "futsal").await;
    service
        .register_team(competition.id, registration("Hawks", "futsal"))
        .await
        .unwrap();
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

    let result = service.generate_fixtures_at(competition.id, now).await;

    assert!(matches!(result, Err(ScheduleError::InsufficientTeams(1))));
}

#[tokio::test]
async fn test_failed_schedule_leaves_no_fixtures() {
    let (service, _store, _notifier) = spawn_service();
    // Two days hold four fixtures; five teams need ten
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 6)))
        .await
        .unwrap();
    register_approved(
        &service,
        competition.id,
        &["Falcons", "Hawks", "Owls", "Bears", "Wolves"],
        "futsal",
    )
    .await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

    let result = service.generate_fixtures_at(competition.id, now).await;

    assert!(matches!(
        result,
        Err(ScheduleError::InsufficientSchedulingDays { .. })
    ));
    assert!(service.list_fixtures(competition.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_standings_follow_recorded_results() {
    let (service, _store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    let teams = register_approved(&service, competition.id, &["Falcons", "Hawks"], "futsal").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let outcome = service.generate_fixtures_at(competition.id, now).await.unwrap();

    let before = service.get_standings(competition.id).await.unwrap();
    assert_eq!(before.modalities.len(), 1);
    assert!(before.modalities[0]
        .standings
        .iter()
        .all(|entry| entry.row.points == 0 && entry.row.games_played == 0));

    let fixture = &outcome.fixtures[0];
    service.record_result(fixture.id, 0, 2).await.unwrap();

    let after = service.get_standings(competition.id).await.unwrap();
    let table = &after.modalities[0].standings;
    assert_eq!(table[0].row.team_id, teams[1].id);
    assert_eq!(table[0].row.points, 3);
    assert_eq!(table[0].position, 1);
    assert_eq!(table[1].row.team_id, teams[0].id);
    assert_eq!(table[1].row.losses, 1);
}

#[tokio::test]
async fn test_skipped_modality_gets_no_schedule_notice() {
    let (service, _store, notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    let futsal = register_approved(&service, competition.id, &["Falcons", "Hawks"], "futsal").await;
    let chess = register_approved(&service, competition.id, &["Lonely"], "chess").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();

    let outcome = service.generate_fixtures_at(competition.id, now).await.unwrap();
    assert_eq!(outcome.fixtures.len(), 1);
    assert_eq!(outcome.warnings.len(), 1);

    // Three approvals plus two schedule notices; give a stray sixth time to arrive
    let sent = wait_for_notifications(&notifier, 6).await;
    assert_eq!(sent.len(), 5);
    let notified: Vec<&str> = sent
        .iter()
        .filter(|n| n.subject.contains("scheduled"))
        .map(|n| n.contact.as_str())
        .collect();
    assert_eq!(notified.len(), 2);
    for team in &futsal {
        assert!(notified.contains(&team.contact_email.as_str()));
    }
    assert!(!notified.contains(&chess[0].contact_email.as_str()));
}

#[tokio::test]
async fn test_scheduled_team_must_stay_approved() {
    let (service, _store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    let teams = register_approved(&service, competition.id, &["Falcons", "Hawks"], "futsal").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    let outcome = service.generate_fixtures_at(competition.id, now).await.unwrap();
    service.record_result(outcome.fixtures[0].id, 2, 0).await.unwrap();

    for status in [ApprovalStatus::Rejected, ApprovalStatus::Pending] {
        let result = service.update_team_status(teams[1].id, status).await;
        assert!(matches!(result, Err(LeagueError::TeamHasFixtures(id)) if id == teams[1].id));
    }

    // Re-approving is harmless
    let same = service
        .update_team_status(teams[1].id, ApprovalStatus::Approved)
        .await
        .unwrap();
    assert_eq!(same.status, ApprovalStatus::Approved);

    let standings = service.get_standings(competition.id).await.unwrap();
    let table = &standings.modalities[0].standings;
    assert_eq!(table.len(), 2);
    let wins: u32 = table.iter().map(|e| e.row.wins).sum();
    assert_eq!(wins, 1);
}

#[tokio::test]
async fn test_list_competitions_latest_first() {
    let (service, _store, _notifier) = spawn_service();
    let older = service
        .create_competition(competition_request(date(2024, 5, 6), date(2024, 5, 17)))
        .await
        .unwrap();
    let newer = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();

    let listed = service.list_competitions().await.unwrap();

    let ids: Vec<Uuid> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn test_update_competition() {
    let (service, _store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();

    let mut request = competition_request(date(2025, 5, 12), date(2025, 5, 23));
    request.name = "  Spring Cup ".to_string();
    request.modalities = vec!["futsal".to_string(), "chess".to_string(), "futsal".to_string()];
    let updated = service
        .update_competition(competition.id, request)
        .await
        .unwrap();

    assert_eq!(updated.id, competition.id);
    assert_eq!(updated.name, "Spring Cup");
    assert_eq!(updated.starts_on, date(2025, 5, 12));
    assert_eq!(updated.ends_on, date(2025, 5, 23));
    assert_eq!(updated.modalities, vec!["futsal", "chess"]);
    assert_eq!(updated.created_at, competition.created_at);
    assert_eq!(service.get_competition(competition.id).await.unwrap(), updated);

    let backwards = service
        .update_competition(competition.id, competition_request(date(2025, 5, 23), date(2025, 5, 12)))
        .await;
    assert!(matches!(backwards, Err(LeagueError::Validation(_))));

    let missing = service
        .update_competition(Uuid::new_v4(), competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await;
    assert!(matches!(missing, Err(LeagueError::CompetitionNotFound(_))));
}

#[tokio::test]
async fn test_competition_dates_freeze_once_scheduled() {
    let (service, _store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    register_approved(&service, competition.id, &["Falcons", "Hawks"], "futsal").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    service.generate_fixtures_at(competition.id, now).await.unwrap();

    let moved = service
        .update_competition(competition.id, competition_request(date(2025, 5, 12), date(2025, 5, 23)))
        .await;
    assert!(matches!(moved, Err(LeagueError::ScheduleLocked(_))));
    assert_eq!(
        service.get_competition(competition.id).await.unwrap().starts_on,
        date(2025, 5, 5)
    );

    let mut renamed = competition_request(date(2025, 5, 5), date(2025, 5, 16));
    renamed.name = "Renamed Cup".to_string();
    let updated = service
        .update_competition(competition.id, renamed)
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed Cup");
}

#[tokio::test]
async fn test_delete_competition_removes_teams_and_fixtures() {
    let (service, store, _notifier) = spawn_service();
    let competition = service
        .create_competition(competition_request(date(2025, 5, 5), date(2025, 5, 16)))
        .await
        .unwrap();
    let other = service
        .create_competition(competition_request(date(2025, 6, 2), date(2025, 6, 13)))
        .await
        .unwrap();
    register_approved(&service, competition.id, &["Falcons", "Hawks"], "futsal").await;
    register_approved(&service, other.id, &["Bears"], "futsal").await;
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 8, 0, 0).unwrap();
    service.generate_fixtures_at(competition.id, now).await.unwrap();

    service.delete_competition(competition.id).await.unwrap();

    assert!(matches!(
        service.get_competition(competition.id).await,
        Err(LeagueError::CompetitionNotFound(_))
    ));
    assert!(store.list_teams(competition.id).await.unwrap().is_empty());
    assert!(store.list_fixtures(competition.id).await.unwrap().is_empty());
    assert_eq!(store.list_teams(other.id).await.unwrap().len(), 1);

    let again = service.delete_competition(competition.id).await;
    assert!(matches!(again, Err(LeagueError::CompetitionNotFound(_))));
}
