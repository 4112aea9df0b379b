mod analysis;
mod config;
mod routes;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, App, HttpServer};
use config::AppConfig;
use routes::configure_routes;

fn cors(allowed_origin: Option<&str>) -> Cors {
    let cors = match allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin),
        None => Cors::default().allow_any_origin(),
    };
    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        log::error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    match &config.cors_allowed_origin {
        Some(origin) => log::info!("CORS restricted to {}", origin),
        None => log::warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin"),
    }

    let bind_address = config.bind_address();
    log::info!("Starting model service on {}", bind_address);

    let cors_origin = config.cors_allowed_origin.clone();
    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(cors_origin.as_deref()))
            .configure(configure_routes)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    server.bind(&bind_address)?.run().await
}
