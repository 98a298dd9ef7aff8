use actix_web::web;

pub mod backend_health;
pub mod competitions;
pub mod fixtures;
pub mod teams;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(backend_health::backend_health);

    cfg.service(
        web::scope("/competitions")
            .service(competitions::create_competition)
            .service(competitions::list_competitions)
            .service(competitions::get_competition)
            .service(competitions::update_competition)
            .service(competitions::delete_competition)
            .service(competitions::register_team)
            .service(competitions::list_teams)
            .service(competitions::generate_fixtures)
            .service(competitions::list_fixtures)
            .service(competitions::get_standings)
    );
    cfg.service(
        web::scope("/teams")
            .service(teams::update_team_status)
    );
    cfg.service(
        web::scope("/fixtures")
            .service(fixtures::get_upcoming_fixtures)
            .service(fixtures::record_result)
            .service(fixtures::cancel_fixture)
            .service(fixtures::reschedule_fixture)
            .service(fixtures::delete_fixture)
    );
}
