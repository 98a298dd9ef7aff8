use actix_web::{delete, get, post, put, web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::fixture_handler;
use crate::league::LeagueService;
use crate::models::fixture::{FixtureResultRequest, RescheduleFixtureRequest, UpcomingFixturesQuery};

/// Get upcoming fixtures
#[get("/upcoming")]
pub async fn get_upcoming_fixtures(
    query: web::Query<UpcomingFixturesQuery>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    fixture_handler::get_upcoming_fixtures(query, league_service).await
}

/// Update fixture result
#[put("/{fixture_id}/result")]
pub async fn record_result(
    path: web::Path<Uuid>,
    request: web::Json<FixtureResultRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    fixture_handler::record_result(fixture_id, request, league_service).await
}

#[post("/{fixture_id}/cancel")]
pub async fn cancel_fixture(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    fixture_handler::cancel_fixture(fixture_id, league_service).await
}

#[put("/{fixture_id}/schedule")]
pub async fn reschedule_fixture(
    path: web::Path<Uuid>,
    request: web::Json<RescheduleFixtureRequest>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    fixture_handler::reschedule_fixture(fixture_id, request, league_service).await
}

#[delete("/{fixture_id}")]
pub async fn delete_fixture(
    path: web::Path<Uuid>,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();
    fixture_handler::delete_fixture(fixture_id, league_service).await
}
