use actix_web::{web, App, HttpServer};
use thegame::config::server::ServerConfig;
use thegame::middleware::request_trace::RequestTrace;
use thegame::middleware::trace_span::TraceSpan;
use thegame::routes;
use thegame::state::app_state::AppState;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    info!(
        host = %config.host,
        port = config.port,
        write_policy = %config.write_policy,
        long_poll_secs = config.long_poll.as_secs(),
        "starting thegame backend"
    );

    let bind = (config.host.clone(), config.port);
    let data = web::Data::new(AppState::new(config));

    HttpServer::new(move || {
        App::new()
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind(bind)?
    .run()
    .await
}
