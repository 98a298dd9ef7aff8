use actix_web::{web, HttpResponse, Result};
use uuid::Uuid;

use crate::handlers::league::schedule_error_response;
use crate::league::LeagueService;
use crate::models::common::ApiResponse;

/// Generate the round-robin fixtures of a competition
#[tracing::instrument(name = "Generating fixtures", skip(league_service))]
pub async fn generate_fixtures(
    competition_id: Uuid,
    league_service: web::Data<LeagueService>,
) -> Result<HttpResponse> {
    match league_service.generate_fixtures(competition_id).await {
        Ok(outcome) => {
            let message = format!("{} fixtures generated successfully", outcome.fixtures.len());
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(message, outcome.fixtures).with_warnings(outcome.warnings)))
        }
        Err(e) => {
            tracing::warn!(
                "Fixture generation failed for competition {}: {}",
                competition_id,
                e
            );
            Ok(schedule_error_response(&e))
        }
    }
}
