use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use estate_gateway::config::{LoggingSettings, Settings};
use estate_gateway::routes::{self, AppState};
use estate_gateway::services::{ChatRelay, ListingsWarehouse, PredictionDispatcher, PreferenceStore, RecommendationClient};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

fn startup_error(what: &str, err: impl std::fmt::Display) -> std::io::Error {
    error!("Failed to initialize {}: {}", what, err);
    std::io::Error::new(std::io::ErrorKind::Other, format!("{}: {}", what, err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_tracing(&settings.as_ref().map(|s| s.logging.clone()).unwrap_or_default());

    let settings = settings.map_err(|e| startup_error("configuration", e))?;

    info!("Starting estate gateway...");

    let predictor = PredictionDispatcher::new(
        settings.prediction.base_url.clone(),
        settings.prediction.timeout(),
    )
    .map_err(|e| startup_error("prediction client", e))?;

    info!(
        "Prediction proxy targets {} ({}s per attempt)",
        predictor.base_url(),
        settings.prediction.timeout().as_secs()
    );

    let recommender = RecommendationClient::new(
        settings.recommendation.base_url.clone(),
        settings.recommendation.timeout(),
    )
    .map_err(|e| startup_error("recommendation client", e))?;

    let chat = ChatRelay::new(settings.chat.webhook_url.clone(), settings.chat.timeout())
        .map_err(|e| startup_error("chat relay", e))?;

    let warehouse = ListingsWarehouse::new(
        &settings.warehouse.url,
        settings.warehouse.max_connections.unwrap_or(5),
        settings.warehouse.table.clone(),
        settings.warehouse.default_limit,
        settings.warehouse.max_limit,
    )
    .map_err(|e| startup_error("listings warehouse", e))?;

    info!("Listings warehouse configured (table: {})", settings.warehouse.table);

    let app_state = AppState {
        predictor: Arc::new(predictor),
        recommender: Arc::new(recommender),
        chat: Arc::new(chat),
        sessions: Arc::new(PreferenceStore::new()),
        warehouse: Arc::new(warehouse),
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let assets = settings.assets.clone();

    info!("Starting HTTP server on {}:{} (assets from {})", host, port, assets.dir);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
            .configure(|cfg| routes::configure_assets(cfg, &assets))
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
