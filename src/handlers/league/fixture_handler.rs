use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::league_error_response;
use crate::league::LeagueService;
use crate::models::common::ApiResponse;
use crate::models::fixture::{FixtureResultRequest, RescheduleFixtureRequest, UpcomingFixturesQuery};

#[tracing::instrument(name = "Listing fixtures", skip(league_service))]
pub async fn list_fixtures(
    competition_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.list_fixtures(competition_id).await {
        Ok(fixtures) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Found {} fixtures", fixtures.len()),
            fixtures,
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

/// Next pending fixtures across all competitions
#[tracing::instrument(
    name = "Getting upcoming fixtures",
    skip(query, league_service),
    fields(query = %query)
)]
pub async fn get_upcoming_fixtures(
    query: web::Query<UpcomingFixturesQuery>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.upcoming_fixtures(query.limit).await {
        Ok(fixtures) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            format!("Found {} upcoming fixtures", fixtures.len()),
            fixtures,
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

/// Record or correct the score of a fixture
#[tracing::instrument(
    name = "Recording fixture result",
    skip(request, league_service),
    fields(home_score = request.home_score, away_score = request.away_score)
)]
pub async fn record_result(
    fixture_id: Uuid,
    request: web::Json<FixtureResultRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service
        .record_result(fixture_id, request.home_score, request.away_score)
        .await
    {
        Ok(fixture) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Fixture result recorded successfully",
            fixture,
        ))),
        Err(e) => {
            tracing::warn!("Failed to record result of fixture {}: {}", fixture_id, e);
            Ok(league_error_response(&e))
        }
    }
}

#[tracing::instrument(name = "Cancelling fixture", skip(league_service))]
pub async fn cancel_fixture(
    fixture_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.cancel_fixture(fixture_id).await {
        Ok(fixture) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Fixture cancelled",
            fixture,
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

#[tracing::instrument(name = "Rescheduling fixture", skip(request, league_service))]
pub async fn reschedule_fixture(
    fixture_id: Uuid,
    request: web::Json<RescheduleFixtureRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let RescheduleFixtureRequest {
        scheduled_at,
        location,
    } = request.into_inner();

    match league_service
        .reschedule_fixture(fixture_id, scheduled_at, location)
        .await
    {
        Ok(fixture) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            "Fixture rescheduled successfully",
            fixture,
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}

#[tracing::instrument(name = "Deleting fixture", skip(league_service))]
pub async fn delete_fixture(
    fixture_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.delete_fixture(fixture_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_message(
            "Fixture deleted",
        ))),
        Err(e) => Ok(league_error_response(&e)),
    }
}
