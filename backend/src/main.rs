mod catalog;
mod config;
mod error;
mod services;
mod state;
mod store;

use actix_files::Files;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::info;

use crate::config::AppConfig;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env();
    let state = AppState::build(&config).map_err(std::io::Error::other)?;

    info!("server running at http://{}:{}", config.host, config.port);

    let static_dir = config.static_dir.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(services::books::configure_routes)
            .configure(services::search::configure_routes)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
