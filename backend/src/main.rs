use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::middleware::{DefaultHeaders, Logger};
use actix_web::{web, App, HttpServer};
use log::{error, info};

use thyroid_backend::config::Config;
use thyroid_backend::{configure, routes, AppState};
use thyroid_inferences::load_classifier;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    info!("🚀 Starting the hypothyroid prediction service");

    let config = Config::from_env().map_err(|e| {
        error!("❌ Invalid configuration: {}", e);
        std::io::Error::other(e)
    })?;

    // Loaded exactly once; read-only for the rest of the process.
    let classifier = match load_classifier(&config.model_path, config.model_classes.clone()) {
        Ok(model) => {
            info!("✅ Model loaded from {}", config.model_path.display());
            model
        }
        Err(e) => {
            error!("❌ {}", e);
            return Err(std::io::Error::other(e));
        }
    };

    let state = web::Data::new(AppState::new(Arc::from(classifier), config.label_policy()));

    let bind_address = config.bind_address();
    let origin = format!("http://{}", bind_address);
    let static_dir = config.static_dir.clone();

    info!("🌐 Server listening on: http://{}", bind_address);
    info!("👷 Workers: {}", config.workers);
    info!("🔧 Endpoints:");
    info!("   GET  /                - Prediction form");
    info!("   POST /                - Submit form");
    info!("   GET  /api/health      - Health check");
    info!("   GET  /api/model-info  - Model information");
    info!("   POST /api/predict     - JSON prediction");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("X-Content-Type-Options", "nosniff")))
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", &static_dir).prefer_utf8(true))
            .default_service(web::route().to(routes::not_found))
    })
    .workers(config.workers)
    .bind(&bind_address)?
    .run()
    .await
}
