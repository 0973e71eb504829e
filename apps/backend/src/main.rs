use actix_web::{web, App, HttpServer};
use games_backend::config::app::Config;
use games_backend::middleware::cors::cors_middleware;
use games_backend::middleware::request_trace::RequestTrace;
use games_backend::middleware::structured_logger::StructuredLogger;
use games_backend::middleware::trace_span::TraceSpan;
use games_backend::routes;
use games_backend::state::builder::build_state;
use games_backend::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment
    // (docker env_file, or sourced manually for local runs).
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state().with_config(&config).build() {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    if !config.game_process.script_path.is_file() {
        error!(
            script = %config.game_process.script_path.display(),
            "game script not found; game requests will fail until it exists"
        );
    }

    info!(
        host = %config.host,
        port = config.port,
        interpreter = %config.game_process.interpreter,
        script = %config.game_process.script_path.display(),
        "starting games backend"
    );

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
