use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::league_error_response;
use crate::league::LeagueService;
use crate::models::common::ApiResponse;

/// Get the per-modality standings of a competition
#[tracing::instrument(name = "Getting standings", skip(league_service))]
pub async fn get_standings(
    competition_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.get_standings(competition_id).await {
        Ok(standings) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Standings retrieved successfully",
            standings,
        ))),
        Err(e) => {
            tracing::error!("Failed to get standings for {}: {}", competition_id, e);
            Ok(league_error_response(&e))
        }
    }
}
