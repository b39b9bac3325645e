use actix_cors::Cors;
use actix_web::http::header;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use std::io;
use std::sync::Arc;

use todoforge::routes::{self, health};
use todoforge::store::PgStore;
use todoforge::{AppError, AppState, Config};

fn to_io(err: AppError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Refusing to start: {}", e);
            std::process::exit(1);
        }
    };

    let store = PgStore::connect(&config).await.map_err(to_io)?;
    store.migrate().await.map_err(to_io)?;

    let state = web::Data::new(AppState::new(&config, Arc::new(store)));

    log::info!("Starting todoforge server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
                    .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
