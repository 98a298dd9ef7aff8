use actix_web::{patch, web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::team_handler;
use crate::league::LeagueService;
use crate::models::team::TeamStatusRequest;

/// Approve, reject or reset a team registration
#[patch("/{team_id}/status")]
pub async fn update_team_status(
    path: web::Path<Uuid>,
    request: web::Json<TeamStatusRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let team_id = path.into_inner();
    team_handler::update_team_status(team_id, request, league_service).await
}
