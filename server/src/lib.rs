use rocket::{Build, Rocket, catchers};
use tracing::info;

use crate::{
    config::ServerConfig, cors::create_cors, logging::RequestLogger, service::Service,
};

pub mod command;
pub mod config;
pub mod cors;
pub mod data;
pub mod error;
pub mod generator;
pub mod logging;
pub mod logic;
pub mod routes;
pub mod service;
pub mod store;

/// Assembles the server for `config` without launching it.
pub fn build(config: ServerConfig) -> Result<Rocket<Build>, rocket_cors::Error> {
    let service = config.service();
    build_with_service(config, service)
}

/// Like [`build`], but serves games from an already assembled [`Service`].
pub fn build_with_service(
    config: ServerConfig,
    service: Service,
) -> Result<Rocket<Build>, rocket_cors::Error> {
    let cors = create_cors(&config.allowed_origins)?;

    info!(
        "🌐 Server configured with CORS, request logging and routes (creation timeout {:?}, max {} cells, origins {:?})",
        config.creation_timeout, config.max_cells, config.allowed_origins
    );

    Ok(rocket::build()
        .attach(cors)
        .attach(RequestLogger)
        .manage(service)
        .manage(config)
        .mount("/", routes::routes())
        .register("/", catchers![routes::default_catcher]))
}
