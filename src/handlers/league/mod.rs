use actix_web::HttpResponse;

use crate::league::{LeagueError, ScheduleError};
use crate::models::common::ApiResponse;

pub mod competition_handler;
pub mod fixture_handler;
pub mod schedule_handler;
pub mod standings_handler;
pub mod team_handler;

/// Turn a management failure into the JSON error body and its HTTP status.
pub(crate) fn league_error_response(error: &LeagueError) -> HttpResponse {
    let body = ApiResponse::<()>::error(error.to_string());
    match error {
        LeagueError::CompetitionNotFound(_)
        | LeagueError::TeamNotFound(_)
        | LeagueError::FixtureNotFound(_) => HttpResponse::NotFound().json(body),
        LeagueError::Validation(_) => HttpResponse::BadRequest().json(body),
        LeagueError::InvalidTransition(_)
        | LeagueError::ScheduleLocked(_)
        | LeagueError::TeamHasFixtures(_) => HttpResponse::Conflict().json(body),
        LeagueError::Storage(e) => {
            tracing::error!("Storage failure: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Internal server error"))
        }
    }
}

pub(crate) fn schedule_error_response(error: &ScheduleError) -> HttpResponse {
    let body = ApiResponse::<()>::error(error.to_string()).with_warnings(error.warnings().to_vec());
    match error {
        ScheduleError::CompetitionNotFound(_) => HttpResponse::NotFound().json(body),
        ScheduleError::FixturesAlreadyExist => HttpResponse::Conflict().json(body),
        ScheduleError::CompetitionAlreadyFinished
        | ScheduleError::InsufficientTeams(_)
        | ScheduleError::InvalidDateWindow { .. }
        | ScheduleError::InsufficientSchedulingDays { .. }
        | ScheduleError::NoFixturesGenerated { .. } => HttpResponse::BadRequest().json(body),
        ScheduleError::Storage(e) => {
            tracing::error!("Storage failure while scheduling: {}", e);
            HttpResponse::InternalServerError()
                .json(ApiResponse::<()>::error("Internal server error"))
        }
    }
}
