//! HTTP routes and the mapping from service errors to responses.

use std::time::Duration;

use actix_web::error::InternalError;
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Serialize;
use serde_json::json;

use crate::db::DbPool;
use crate::domain::entry::EntryKind;
use crate::middleware::RequestId;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, ServiceResult};

pub mod entries;

pub const BAD_REQUEST: &str = "BAD_REQUEST";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const BAD_QUERY_PARAMS: &str = "BAD_QUERY_PARAMS";
pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub message: &'static str,
    pub status_code: u16,
}

impl ErrorMessage {
    pub fn respond(message: &'static str, status: actix_web::http::StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(ErrorMessage {
            message,
            status_code: status.as_u16(),
        })
    }
}

fn status_of(err: &ServiceError) -> (actix_web::http::StatusCode, &'static str) {
    use actix_web::http::StatusCode;

    match err {
        ServiceError::Parse(_) => (StatusCode::BAD_REQUEST, BAD_QUERY_PARAMS),
        ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, BAD_REQUEST),
        ServiceError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND),
        ServiceError::RequestTimeout => (StatusCode::REQUEST_TIMEOUT, REQUEST_TIMEOUT),
        ServiceError::Storage(_) | ServiceError::Configuration(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR)
        }
    }
}

/// Logs the failure with the request id and caller address, then renders it.
pub fn error_response(req: &HttpRequest, err: &ServiceError) -> HttpResponse {
    let address = req
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    log::error!(
        "RequestID: {}, IPAddress: {address}, Error: {err}",
        RequestId::of(req)
    );

    let (status, message) = status_of(err);
    ErrorMessage::respond(message, status)
}

/// Runs blocking repository work on the actix thread pool under a deadline.
///
/// The caller answers with [`ServiceError::RequestTimeout`] once `timeout`
/// elapses. The work itself keeps running until its repository reaches the
/// next [`Deadline`](crate::repository::deadline::Deadline) check.
pub async fn run_blocking<T, F>(timeout: Duration, f: F) -> ServiceResult<T>
where
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
    T: Send + 'static,
{
    match actix_web::rt::time::timeout(timeout, web::block(f)).await {
        Err(_) => Err(ServiceError::RequestTimeout),
        Ok(Err(e)) => Err(ServiceError::Storage(format!("blocking task failed: {e}"))),
        Ok(Ok(result)) => result,
    }
}

#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "pong" }))
}

fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, req| {
            log::error!(
                "RequestID: {}, IPAddress: {}, Error: {err}",
                RequestId::of(req),
                req.peer_addr()
                    .map(|addr| addr.to_string())
                    .unwrap_or_else(|| "-".to_string())
            );
            let response = ErrorMessage::respond(
                BAD_REQUEST,
                actix_web::http::StatusCode::BAD_REQUEST,
            );
            InternalError::from_response(err, response).into()
        })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        let response =
            ErrorMessage::respond(BAD_REQUEST, actix_web::http::StatusCode::BAD_REQUEST);
        InternalError::from_response(err, response).into()
    })
}

fn entry_scope(path: &str, pool: &DbPool, kind: EntryKind) -> actix_web::Scope {
    web::scope(path)
        .app_data(web::Data::new(DieselRepository::new(pool.clone(), kind)))
        .configure(entries::configure)
}

/// Builds the `/v1` API with one scope per resource.
pub fn api_v1(pool: &DbPool, server_config: &ServerConfig) -> actix_web::Scope {
    web::scope("/v1")
        .app_data(json_config(server_config.body_limit))
        .app_data(path_config())
        .app_data(web::Data::new(server_config.clone()))
        .service(ping)
        .service(entry_scope("/blogs", pool, EntryKind::Blog))
        .service(entry_scope("/news", pool, EntryKind::News))
}
