use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};

use crate::cache::{ClienteCache, VehiculoCache};
use crate::db::establish_connection_pool;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::cliente::{
    create_cliente, delete_cliente, get_cliente, list_clientes, patch_cliente, update_cliente,
    update_cliente_imagen,
};
use crate::routes::vehiculo::{
    create_vehiculo, delete_vehiculo, get_vehiculo, list_vehiculos, patch_vehiculo,
    update_vehiculo, update_vehiculo_image,
};
use crate::routes::{json_error_handler, path_error_handler, query_error_handler};
use crate::storage::{FILES_PATH, FileSystemStorage};

pub mod cache;
pub mod db;
pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod storage;

/// Registers every API route and the extractor error handlers.
///
/// Clientes live under the fixed `/api/clientes` prefix; vehiculos are
/// mounted under `api_version`.
pub fn configure(cfg: &mut web::ServiceConfig, api_version: &str) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(list_clientes)
        .service(create_cliente)
        .service(update_cliente_imagen)
        .service(get_cliente)
        .service(update_cliente)
        .service(patch_cliente)
        .service(delete_cliente)
        .service(
            web::scope(api_version)
                .service(list_vehiculos)
                .service(create_vehiculo)
                .service(update_vehiculo_image)
                .service(get_vehiculo)
                .service(update_vehiculo)
                .service(patch_vehiculo)
                .service(delete_vehiculo),
        );
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);
    let clientes_cache = ClienteCache::new();
    let vehiculos_cache = VehiculoCache::new();
    let storage = FileSystemStorage::new(&server_config.upload_dir, FILES_PATH)?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Starting server on {}:{} (vehiculos under {})",
        bind_address.0,
        bind_address.1,
        server_config.api_version
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new(FILES_PATH, storage.root()))
            .configure(|cfg| configure(cfg, &server_config.api_version))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(clientes_cache.clone()))
            .app_data(web::Data::new(vehiculos_cache.clone()))
            .app_data(web::Data::new(storage.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
