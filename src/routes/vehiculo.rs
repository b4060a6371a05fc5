use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, delete, get, patch, post, put, web};
use uuid::Uuid;

use crate::cache::VehiculoCache;
use crate::domain::types::VehiculoId;
use crate::dto::vehiculo::VehiculoResponse;
use crate::forms::image::{VehiculoImageForm, inspect_upload};
use crate::forms::vehiculo::{VehiculoCreateDto, VehiculoListParams, VehiculoUpdateDto};
use crate::pagination::PageResponse;
use crate::repository::DieselRepository;
use crate::routes::{service_error_response, validation_failed};
use crate::services::vehiculo as service;
use crate::storage::FileSystemStorage;

const NOT_FOUND: &str = "Vehiculo no encontrado";

#[get("/vehiculos")]
pub async fn list_vehiculos(
    params: web::Query<VehiculoListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let query = match params.to_query() {
        Ok(query) => query,
        Err(errors) => return validation_failed(&errors),
    };
    log::info!(
        "Listing vehiculos page {} size {} sorted by {} {}",
        params.page,
        params.size,
        params.sort_by.as_str(),
        params.direction
    );

    match service::list_vehiculos(repo.get_ref(), query) {
        Ok(page) => HttpResponse::Ok().json(PageResponse::of(
            page.map(VehiculoResponse::from),
            params.sort_by.as_str(),
            params.direction,
        )),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

#[get("/vehiculos/{id}")]
pub async fn get_vehiculo(
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<VehiculoCache>,
) -> impl Responder {
    let id = VehiculoId::from(id.into_inner());
    log::info!("Fetching vehiculo {id}");

    match service::get_vehiculo(repo.get_ref(), cache.get_ref(), id) {
        Ok(vehiculo) => HttpResponse::Ok().json(VehiculoResponse::from(vehiculo)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

#[post("/vehiculos")]
pub async fn create_vehiculo(
    repo: web::Data<DieselRepository>,
    cache: web::Data<VehiculoCache>,
    web::Json(dto): web::Json<VehiculoCreateDto>,
) -> impl Responder {
    let new_vehiculo = match dto.into_domain() {
        Ok(new_vehiculo) => new_vehiculo,
        Err(errors) => return validation_failed(&errors),
    };
    log::info!("Creating vehiculo {}", new_vehiculo.id);

    match service::create_vehiculo(repo.get_ref(), cache.get_ref(), &new_vehiculo) {
        Ok(vehiculo) => HttpResponse::Ok().json(VehiculoResponse::from(vehiculo)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

fn apply_update(
    id: Uuid,
    repo: &DieselRepository,
    cache: &VehiculoCache,
    dto: VehiculoUpdateDto,
) -> HttpResponse {
    let id = VehiculoId::from(id);
    let updates = match dto.into_domain() {
        Ok(updates) => updates,
        Err(errors) => return validation_failed(&errors),
    };
    log::info!("Updating vehiculo {id}");

    match service::update_vehiculo(repo, cache, id, &updates) {
        Ok(vehiculo) => HttpResponse::Ok().json(VehiculoResponse::from(vehiculo)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

#[put("/vehiculos/{id}")]
pub async fn update_vehiculo(
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<VehiculoCache>,
    web::Json(dto): web::Json<VehiculoUpdateDto>,
) -> impl Responder {
    apply_update(id.into_inner(), &repo, &cache, dto)
}

#[patch("/vehiculos/{id}")]
pub async fn patch_vehiculo(
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<VehiculoCache>,
    web::Json(dto): web::Json<VehiculoUpdateDto>,
) -> impl Responder {
    apply_update(id.into_inner(), &repo, &cache, dto)
}

#[delete("/vehiculos/{id}")]
pub async fn delete_vehiculo(
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<VehiculoCache>,
) -> impl Responder {
    let id = VehiculoId::from(id.into_inner());
    log::info!("Deleting vehiculo {id}");

    match service::delete_vehiculo(repo.get_ref(), cache.get_ref(), id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}

/// Rejected uploads answer a bare 400, unlike the cliente endpoint.
#[patch("/vehiculos/image/{id}")]
pub async fn update_vehiculo_image(
    id: web::Path<Uuid>,
    repo: web::Data<DieselRepository>,
    cache: web::Data<VehiculoCache>,
    storage: web::Data<FileSystemStorage>,
    MultipartForm(form): MultipartForm<VehiculoImageForm>,
) -> impl Responder {
    let id = VehiculoId::from(id.into_inner());
    log::info!("Updating image of vehiculo {id}");

    let upload = match inspect_upload(form.image.as_ref()) {
        Ok(upload) => upload,
        Err(err) => {
            log::error!("Failed to update image of vehiculo {id}: {err}");
            return HttpResponse::BadRequest().finish();
        }
    };

    match service::update_vehiculo_imagen(
        repo.get_ref(),
        cache.get_ref(),
        storage.get_ref(),
        id,
        &upload,
    ) {
        Ok(vehiculo) => HttpResponse::Ok().json(VehiculoResponse::from(vehiculo)),
        Err(err) => service_error_response(&err, NOT_FOUND),
    }
}
