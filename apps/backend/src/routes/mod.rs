use actix_web::web;

pub mod games;
pub mod health;

/// Register every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(web::scope("/games").configure(games::configure_routes));
}
