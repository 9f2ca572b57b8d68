use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use number_info_relay::{configure_routes, envelope_errors, AppState, Settings};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Initialize logging from `LOG_LEVEL` and `LOG_FORMAT`
fn init_tracing() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    init_tracing();

    info!("Starting Number Info API relay...");

    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    if settings.auth.uses_default_key() {
        warn!("SPLEXXO_API_KEY is not set, accepting the built-in default API key");
    }

    let app_state = AppState::from_settings(&settings).map_err(|e| {
        error!("Failed to create upstream client: {}", e);
        std::io::Error::other(e)
    })?;

    info!(
        "Upstream client initialized ({}, timeout: {}s)",
        settings.upstream.base_url, settings.upstream.timeout_secs
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(envelope_errors())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
