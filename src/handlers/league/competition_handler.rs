use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::league_error_response;
use crate::league::LeagueService;
use crate::models::common::ApiResponse;
use crate::models::competition::{CreateCompetitionRequest, UpdateCompetitionRequest};

/// Create a new competition
#[tracing::instrument(
    name = "Creating a competition",
    skip(request, league_service),
    fields(name = %request.name)
)]
pub async fn create_competition(
    request: web::Json<CreateCompetitionRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.create_competition(request.into_inner()).await {
        Ok(competition) => Ok(HttpResponse::Created().json(ApiResponse::success(
            "Competition created successfully",
            competition,
        ))),
        Err(e) => {
            tracing::warn!("Failed to create competition: {}", e);
            Ok(league_error_response(&e))
        }
    }
}

#[tracing::instrument(name = "Getting a competition", skip(league_service))]
pub async fn get_competition(
    competition_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.get_competition(competition_id).await {
        Ok(competition) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Competition retrieved successfully",
            competition,
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

#[tracing::instrument(name = "Listing competitions", skip(league_service))]
pub async fn list_competitions(league_service: web::Data<LeagueService>) -> Result<HttpResponse> {
    match league_service.list_competitions().await {
        Ok(competitions) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Competitions retrieved successfully",
            competitions,
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

/// Edit a competition
#[tracing::instrument(
    name = "Updating a competition",
    skip(request, league_service),
    fields(name = %request.name)
)]
pub async fn update_competition(
    competition_id: Uuid,
    request: web::Json<UpdateCompetitionRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service
        .update_competition(competition_id, request.into_inner())
        .await
    {
        Ok(competition) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Competition updated successfully",
            competition,
        ))),
        Err(e) => {
            tracing::warn!("Failed to update competition {}: {}", competition_id, e);
            Ok(league_error_response(&e))
        }
    }
}

#[tracing::instrument(name = "Deleting a competition", skip(league_service))]
pub async fn delete_competition(
    competition_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.delete_competition(competition_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message(
            "Competition deleted successfully",
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}
