use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::league_error_response;
use crate::league::LeagueService;
use crate::models::common::ApiResponse;
use crate::models::team::{TeamRegistrationRequest, TeamStatusRequest};

/// Register a team in a competition
#[tracing::instrument(
    name = "Registering a team",
    skip(request, league_service),
    fields(team_name = %request.name, modality = %request.modality)
)]
pub async fn register_team(
    competition_id: Uuid,
    request: web::Json<TeamRegistrationRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service
        .register_team(competition_id, request.into_inner())
        .await
    {
        Ok(team) => Ok(HttpResponse::Created().json(ApiResponse::success(
            "Team registered successfully, awaiting approval",
            team,
        ))),
        Err(e) => {
            tracing::warn!("Failed to register team in {}: {}", competition_id, e);
            Ok(league_error_response(&e))
        }
    }
}

#[tracing::instrument(name = "Listing teams", skip(league_service))]
pub async fn list_teams(
    competition_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.list_teams(competition_id).await {
        Ok(teams) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Found {} teams", teams.len()),
            teams,
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

/// Approve or reject a team registration
#[tracing::instrument(
    name = "Updating team status",
    skip(request, league_service),
    fields(status = %request.status)
)]
pub async fn update_team_status(
    team_id: Uuid,
    request: web::Json<TeamStatusRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service
        .update_team_status(team_id, request.status)
        .await
    {
        Ok(team) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Team is now {}", team.status),
            team,
        ))),
        Err(e) => {
            tracing::warn!("Failed to update status of team {}: {}", team_id, e);
            Ok(league_error_response(&e))
        }
    }
}
