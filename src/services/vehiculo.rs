use crate::cache::Cache;
use crate::domain::types::VehiculoId;
use crate::domain::vehiculo::{NewVehiculo, UpdateVehiculo, Vehiculo};
use crate::pagination::Page;
use crate::repository::{VehiculoListQuery, VehiculoReader, VehiculoWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{ImageStorage, ImageUpload};

/// Runs a filtered, sorted and paged listing.
pub fn list_vehiculos<R>(repo: &R, query: VehiculoListQuery) -> ServiceResult<Page<Vehiculo>>
where
    R: VehiculoReader + ?Sized,
{
    let request = query.pagination.unwrap_or_default();
    let query = VehiculoListQuery {
        pagination: Some(request),
        ..query
    };

    let (total, vehiculos) = repo.list_vehiculos(query).map_err(|err| {
        log::error!("Failed to list vehiculos: {err}");
        err
    })?;

    Ok(Page::new(vehiculos, total, request))
}

/// Looks a vehiculo up by id, reading through the cache.
///
/// Soft-deleted vehiculos are still returned.
pub fn get_vehiculo<R, C>(repo: &R, cache: &C, id: VehiculoId) -> ServiceResult<Vehiculo>
where
    R: VehiculoReader + ?Sized,
    C: Cache<VehiculoId, Vehiculo> + ?Sized,
{
    if let Some(vehiculo) = cache.get(&id) {
        return Ok(vehiculo);
    }

    let vehiculo = repo
        .get_vehiculo_by_id(id)?
        .ok_or(ServiceError::NotFound)?;
    cache.put(id, vehiculo.clone());
    Ok(vehiculo)
}

pub fn create_vehiculo<R, C>(
    repo: &R,
    cache: &C,
    new_vehiculo: &NewVehiculo,
) -> ServiceResult<Vehiculo>
where
    R: VehiculoWriter + ?Sized,
    C: Cache<VehiculoId, Vehiculo> + ?Sized,
{
    let vehiculo = repo.create_vehiculo(new_vehiculo)?;
    cache.put(vehiculo.id, vehiculo.clone());
    Ok(vehiculo)
}

pub fn update_vehiculo<R, C>(
    repo: &R,
    cache: &C,
    id: VehiculoId,
    updates: &UpdateVehiculo,
) -> ServiceResult<Vehiculo>
where
    R: VehiculoWriter + ?Sized,
    C: Cache<VehiculoId, Vehiculo> + ?Sized,
{
    let vehiculo = repo.update_vehiculo(id, updates)?;
    cache.put(id, vehiculo.clone());
    Ok(vehiculo)
}

/// Soft-deletes the vehiculo and drops it from the cache.
pub fn delete_vehiculo<R, C>(repo: &R, cache: &C, id: VehiculoId) -> ServiceResult<()>
where
    R: VehiculoWriter + ?Sized,
    C: Cache<VehiculoId, Vehiculo> + ?Sized,
{
    repo.delete_vehiculo(id)?;
    cache.evict(&id);
    Ok(())
}

/// Stores `upload` as the vehiculo image, removing the previous local file.
pub fn update_vehiculo_imagen<R, C, S>(
    repo: &R,
    cache: &C,
    storage: &S,
    id: VehiculoId,
    upload: &ImageUpload<'_>,
) -> ServiceResult<Vehiculo>
where
    R: VehiculoReader + VehiculoWriter + ?Sized,
    C: Cache<VehiculoId, Vehiculo> + ?Sized,
    S: ImageStorage + ?Sized,
{
    let current = repo.get_vehiculo_by_id(id)?.ok_or(ServiceError::NotFound)?;

    let url = storage.store(upload)?;
    let vehiculo = match repo.update_vehiculo_imagen(id, &url) {
        Ok(vehiculo) => vehiculo,
        Err(err) => {
            if let Err(cleanup) = storage.delete(&url) {
                log::warn!("Failed to remove orphaned image {url}: {cleanup}");
            }
            return Err(err.into());
        }
    };

    if let Some(previous) = current.imagen.as_deref()
        && let Err(err) = storage.delete(previous)
    {
        log::warn!("Failed to remove previous image {previous}: {err}");
    }

    cache.put(id, vehiculo.clone());
    Ok(vehiculo)
}
