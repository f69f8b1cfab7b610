//! SaltGuard triage service
//!
//! Main entry point for the SaltGuard triage API.

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use saltguard::api::{self, middleware, AppState};
use saltguard::config::{self, LogFormat};
use saltguard::core::ai::PredictionClient;
use tracing::info;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let config = config::load_config().context("failed to load configuration")?;
    init_tracing(config.logging.format);

    // Prediction service client
    let predictor = PredictionClient::new(&config.prediction)
        .context("failed to build prediction client")?;
    info!(endpoint = %predictor.endpoint(), "prediction service configured");

    // Create app state
    let app_state = web::Data::new(AppState { predictor });

    let bind = (config.server.host.clone(), config.server.port);
    info!(host = %bind.0, port = bind.1, "starting SaltGuard triage API");

    // Start HTTP server
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::cors())
            .wrap(TracingLogger::default())
            .configure(api::configure)
    })
    .bind(bind)
    .context("failed to bind server address")?
    .run()
    .await?;

    Ok(())
}
