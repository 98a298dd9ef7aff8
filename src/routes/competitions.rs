use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::{competition_handler, schedule_handler, standings_handler, team_handler, fixture_handler};
use crate::league::LeagueService;
use crate::models::competition::{CreateCompetitionRequest, UpdateCompetitionRequest};
use crate::models::team::TeamRegistrationRequest;

/// Create a new competition
#[post("")]
pub async fn create_competition(
    request: web::Json<CreateCompetitionRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    competition_handler::create_competition(request, league_service).await
}

#[get("")]
pub async fn list_competitions(
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    competition_handler::list_competitions(league_service).await
}

#[get("/{competition_id}")]
pub async fn get_competition(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    competition_handler::get_competition(competition_id, league_service).await
}

#[put("/{competition_id}")]
pub async fn update_competition(
    path: web::Path<Uuid>,
    request: web::Json<UpdateCompetitionRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    competition_handler::update_competition(competition_id, request, league_service).await
}

/// Delete a competition with its teams and fixtures
#[delete("/{competition_id}")]
pub async fn delete_competition(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    competition_handler::delete_competition(competition_id, league_service).await
}

/// Register a team for a competition
#[post("/{competition_id}/teams")]
pub async fn register_team(
    path: web::Path<Uuid>,
    request: web::Json<TeamRegistrationRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    team_handler::register_team(competition_id, request, league_service).await
}

#[get("/{competition_id}/teams")]
pub async fn list_teams(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    team_handler::list_teams(competition_id, league_service).await
}

/// Generate the full fixture list
#[post("/{competition_id}/fixtures/generate")]
pub async fn generate_fixtures(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    schedule_handler::generate_fixtures(competition_id, league_service).await
}

#[get("/{competition_id}/fixtures")]
pub async fn list_fixtures(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    fixture_handler::list_fixtures(competition_id, league_service).await
}

/// Get competition standings
#[get("/{competition_id}/standings")]
pub async fn get_standings(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let competition_id = path.into_inner();
    standings_handler::get_standings(competition_id, league_service).await
}
