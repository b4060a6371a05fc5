use actix_multipart::form::MultipartForm;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};

use crate::cache::ClienteCache;
use crate::domain::types::Dni;
use crate::dto::cliente::ClienteResponse;
use crate::forms::cliente::{ClienteCreateRequest, ClienteUpdateRequest};
use crate::forms::image::{ClienteImagenForm, ImageUploadError, inspect_upload};
use crate::repository::DieselRepository;
use crate::routes::{error_body, service_error_response, validation_failed};
use crate::services::cliente as service;
use crate::storage::FileSystemStorage;

const NOT_FOUND: &str = "Cliente no encontrado";
const IMAGE_NOT_SENT: &str = "No se ha enviado una imagen para el cliente";
const IMAGE_TYPE_UNKNOWN: &str = "No se puede saber el tipo de la imagen";

/// A DNI that cannot exist is reported the same way as a missing cliente.
fn parse_dni(id: &str) -> Result<Dni, HttpResponse> {
    Dni::new(id).map_err(|_| error_body(StatusCode::NOT_FOUND, NOT_FOUND))
}

#[get("/api/clientes")]
pub async fn list_clientes(repo: web::Data<DieselRepository>) -> impl Responder {
    log::info!("Listing clientes");
    match service::list_clientes(repo.get_ref()) {
        Ok(clientes) => HttpResponse::Ok().json(
            clientes
                .into_iter()
                .map(ClienteResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

#[get("/api/clientes/{id}")]
pub async fn get_cliente(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<ClienteCache>,
) -> impl Responder {
    let dni = match parse_dni(&id) {
        Ok(dni) => dni,
        Err(response) => return response,
    };
    log::info!("Fetching cliente {dni}");

    match service::get_cliente(repo.get_ref(), cache.get_ref(), &dni) {
        Ok(cliente) => HttpResponse::Ok().json(ClienteResponse::from(cliente)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

#[post("/api/clientes")]
pub async fn create_cliente(
    repo: web::Data<DieselRepository>,
    cache: web::Data<ClienteCache>,
    web::Json(request): web::Json<ClienteCreateRequest>,
) -> impl Responder {
    let new_cliente = match request.into_domain() {
        Ok(new_cliente) => new_cliente,
        Err(errors) => return validation_failed(&errors),
    };
    log::info!("Creating cliente {}", new_cliente.dni);

    match service::create_cliente(repo.get_ref(), cache.get_ref(), &new_cliente) {
        Ok(cliente) => HttpResponse::Created().json(ClienteResponse::from(cliente)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

fn apply_update(
    id: &str,
    repo: &DieselRepository,
    cache: &ClienteCache,
    request: ClienteUpdateRequest,
) -> HttpResponse {
    let dni = match parse_dni(id) {
        Ok(dni) => dni,
        Err(response) => return response,
    };
    let updates = match request.into_domain() {
        Ok(updates) => updates,
        Err(errors) => return validation_failed(&errors),
    };
    log::info!("Updating cliente {dni}");

    match service::update_cliente(repo, cache, &dni, &updates) {
        Ok(cliente) => HttpResponse::Ok().json(ClienteResponse::from(cliente)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

#[put("/api/clientes/{id}")]
pub async fn update_cliente(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<ClienteCache>,
    web::Json(request): web::Json<ClienteUpdateRequest>,
) -> impl Responder {
    apply_update(&id, &repo, &cache, request)
}

#[patch("/api/clientes/{id}")]
pub async fn patch_cliente(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<ClienteCache>,
    web::Json(request): web::Json<ClienteUpdateRequest>,
) -> impl Responder {
    apply_update(&id, &repo, &cache, request)
}

#[delete("/api/clientes/{id}")]
pub async fn delete_cliente(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<ClienteCache>,
) -> impl Responder {
    let dni = match parse_dni(&id) {
        Ok(dni) => dni,
        Err(response) => return response,
    };
    log::info!("Deleting cliente {dni}");

    match service::delete_cliente(repo.get_ref(), cache.get_ref(), &dni) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

#[patch("/api/clientes/imagen/{id}")]
pub async fn update_cliente_imagen(
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<ClienteCache>,
    storage: web::Data<FileSystemStorage>,
    MultipartForm(form): MultipartForm<ClienteImagenForm>,
) -> impl Responder {
    let dni = match parse_dni(&id) {
        Ok(dni) => dni,
        Err(response) => return response,
    };
    log::info!("Updating imagen of cliente {dni}");

    let upload = match inspect_upload(form.imagen.as_ref()) {
        Ok(upload) => upload,
        Err(err) => {
            log::info!("Rejected imagen for cliente {dni}: {err}");
            let message = match err {
                ImageUploadError::UnknownContentType => IMAGE_TYPE_UNKNOWN,
                _ => IMAGE_NOT_SENT,
            };
            return error_body(StatusCode::BAD_REQUEST, message);
        }
    };

    match service::update_cliente_imagen(
        repo.get_ref(),
        cache.get_ref(),
        storage.get_ref(),
        &dni,
        &upload,
    ) {
        Ok(cliente) => HttpResponse::Ok().json(ClienteResponse::from(cliente)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}
