//! Handlers shared by the `/v1/blogs` and `/v1/news` scopes.
//!
//! Each scope registers its own [`DieselRepository`] as app data, so the same
//! handlers serve both tables. Every request works on a copy bound to the
//! request deadline.

use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};

use crate::dto::entries::ListParams;
use crate::forms::entry::EntryForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::repository::deadline::Deadline;
use crate::routes::{error_response, run_blocking};
use crate::services::entries;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_entry)
        .service(list_entries)
        .service(show_entry)
        .service(update_entry)
        .service(delete_entry);
}

#[post("")]
pub async fn create_entry(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<EntryForm>,
) -> impl Responder {
    let timeout = server_config.request_timeout();
    let repo = repo.with_deadline(Deadline::after(timeout));

    match run_blocking(timeout, move || entries::create_entry(&repo, form)).await {
        Ok(entry) => HttpResponse::Created().json(entry),
        Err(err) => error_response(&req, &err),
    }
}

#[get("")]
pub async fn list_entries(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    params: web::Query<ListParams>,
) -> impl Responder {
    let timeout = server_config.request_timeout();
    let repo = repo.with_deadline(Deadline::after(timeout));
    let params = params.into_inner();

    match run_blocking(timeout, move || entries::list_entries(&repo, &params)).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&req, &err),
    }
}

#[get("/{id}")]
pub async fn show_entry(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    id: web::Path<i64>,
) -> impl Responder {
    let timeout = server_config.request_timeout();
    let repo = repo.with_deadline(Deadline::after(timeout));
    let id = id.into_inner();

    match run_blocking(timeout, move || entries::get_entry(&repo, id)).await {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(err) => error_response(&req, &err),
    }
}

#[put("/{id}")]
pub async fn update_entry(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    id: web::Path<i64>,
    web::Json(form): web::Json<EntryForm>,
) -> impl Responder {
    let timeout = server_config.request_timeout();
    let repo = repo.with_deadline(Deadline::after(timeout));
    let id = id.into_inner();

    match run_blocking(timeout, move || entries::update_entry(&repo, id, form)).await {
        Ok(entry) => HttpResponse::Ok().json(entry),
        Err(err) => error_response(&req, &err),
    }
}

#[delete("/{id}")]
pub async fn delete_entry(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    id: web::Path<i64>,
) -> impl Responder {
    let timeout = server_config.request_timeout();
    let repo = repo.with_deadline(Deadline::after(timeout));
    let id = id.into_inner();

    match run_blocking(timeout, move || entries::delete_entry(&repo, id)).await {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(&req, &err),
    }
}
