//! Blog and news REST service.
//!
//! The `data` feature exposes the persistence and service layers; the
//! `server` feature adds the Actix-web application built by [`run`].

#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware as actix_middleware};

#[cfg(feature = "server")]
use crate::db::establish_connection_pool;
#[cfg(feature = "server")]
use crate::middleware::{RequestIdMiddleware, security_headers};
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::api_v1;

/// Access log line: caller, request line, status, size, request id, latency.
#[cfg(feature = "server")]
pub const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %{x-request-id}o %T"#;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
///
/// Request heads are bounded by actix-http's own header limits.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    // Establish Diesel connection pool for the SQLite database.
    let pool = establish_connection_pool(&server_config.database_url, &server_config.database)
        .map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;

    log::info!(
        "Connected to {} (pool size {})",
        server_config.database_url,
        server_config.database.max_size
    );

    let bind_address = (server_config.address.clone(), server_config.port);
    let read_timeout = server_config.read_timeout();
    let write_timeout = server_config.write_timeout();
    let shutdown_timeout = server_config.shutdown_timeout_secs;

    log::info!(
        "Server is listening on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(RequestIdMiddleware)
            .wrap(actix_middleware::Logger::new(ACCESS_LOG_FORMAT))
            .wrap(security_headers())
            .wrap(actix_middleware::Compress::default())
            .wrap(Cors::permissive())
            .service(api_v1(&pool, &server_config))
    })
    .client_request_timeout(read_timeout)
    .client_disconnect_timeout(write_timeout)
    .shutdown_timeout(shutdown_timeout)
    .bind(bind_address)?
    .run()
    .await
}
