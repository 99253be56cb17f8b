use actix_cors::Cors;
use actix_web::{http, middleware, web, App, HttpServer};
use env_logger::Env;

use config::Config;

mod config;
mod db;
mod error;
mod models;
mod routes;
mod schema;
mod types;
mod utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    // before the logger, so RUST_LOG can come from .env
    let dotenv = config::load_dotenv();
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    if let Some(path) = dotenv {
        log::debug!("loaded environment from {}", path.display());
    }

    let config = Config::from_env().map_err(std::io::Error::other)?;

    let pool =
        db::create_pool(&config.database_url, config.pool_size).map_err(std::io::Error::other)?;
    {
        let mut conn = pool.get().map_err(std::io::Error::other)?;
        db::init_schema(&mut conn).map_err(std::io::Error::other)?;
    }
    log::info!("using database {}", config.database_url);

    let Config {
        host,
        port,
        workers,
        allowed_origins,
        ..
    } = config;

    let app = HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "DELETE"])
            .allowed_headers(vec![http::header::AUTHORIZATION, http::header::ACCEPT])
            .allowed_header(http::header::CONTENT_TYPE)
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(pool.clone()))
            .configure(routes::configure)
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
    })
    .workers(workers)
    .bind((host.as_str(), port))?
    .run();

    log::info!("Server running at http://{host}:{port}");

    app.await
}
