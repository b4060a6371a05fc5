use crate::cache::Cache;
use crate::domain::cliente::{Cliente, NewCliente, UpdateCliente};
use crate::domain::types::Dni;
use crate::repository::{ClienteReader, ClienteWriter};
use crate::services::{ServiceError, ServiceResult};
use crate::storage::{ImageStorage, ImageUpload};

/// Returns every stored cliente. Listings never touch the cache.
pub fn list_clientes<R>(repo: &R) -> ServiceResult<Vec<Cliente>>
where
    R: ClienteReader + ?Sized,
{
    repo.list_clientes().map_err(ServiceError::from)
}

/// Looks a cliente up by DNI, reading through the cache.
pub fn get_cliente<R, C>(repo: &R, cache: &C, dni: &Dni) -> ServiceResult<Cliente>
where
    R: ClienteReader + ?Sized,
    C: Cache<Dni, Cliente> + ?Sized,
{
    if let Some(cliente) = cache.get(dni) {
        return Ok(cliente);
    }

    let cliente = repo
        .get_cliente_by_dni(dni)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)?;
    cache.put(dni.clone(), cliente.clone());
    Ok(cliente)
}

pub fn create_cliente<R, C>(repo: &R, cache: &C, new_cliente: &NewCliente) -> ServiceResult<Cliente>
where
    R: ClienteReader + ClienteWriter + ?Sized,
    C: Cache<Dni, Cliente> + ?Sized,
{
    if repo.get_cliente_by_dni(&new_cliente.dni)?.is_some() {
        return Err(ServiceError::Conflict(format!(
            "Ya existe un cliente con el DNI {}",
            new_cliente.dni
        )));
    }

    let cliente = repo.create_cliente(new_cliente).map_err(|err| {
        log::error!("Failed to create cliente {}: {err}", new_cliente.dni);
        err
    })?;
    cache.put(cliente.dni.clone(), cliente.clone());
    Ok(cliente)
}

/// Applies the fields present in `updates`; an empty update returns the
/// stored cliente untouched.
pub fn update_cliente<R, C>(
    repo: &R,
    cache: &C,
    dni: &Dni,
    updates: &UpdateCliente,
) -> ServiceResult<Cliente>
where
    R: ClienteReader + ClienteWriter + ?Sized,
    C: Cache<Dni, Cliente> + ?Sized,
{
    if updates.is_empty() {
        return get_cliente(repo, cache, dni);
    }

    let cliente = repo.update_cliente(dni, updates)?;
    cache.put(dni.clone(), cliente.clone());
    Ok(cliente)
}

pub fn delete_cliente<R, C>(repo: &R, cache: &C, dni: &Dni) -> ServiceResult<()>
where
    R: ClienteWriter + ?Sized,
    C: Cache<Dni, Cliente> + ?Sized,
{
    repo.delete_cliente(dni)?;
    cache.evict(dni);
    Ok(())
}

/// Stores `upload` and points the cliente at it.
///
/// The previous image, if it was stored locally, is removed afterwards. A
/// failure to remove it is logged and does not fail the request.
pub fn update_cliente_imagen<R, C, S>(
    repo: &R,
    cache: &C,
    storage: &S,
    dni: &Dni,
    upload: &ImageUpload<'_>,
) -> ServiceResult<Cliente>
where
    R: ClienteReader + ClienteWriter + ?Sized,
    C: Cache<Dni, Cliente> + ?Sized,
    S: ImageStorage + ?Sized,
{
    let current = repo
        .get_cliente_by_dni(dni)?
        .ok_or(ServiceError::NotFound)?;

    let url = storage.store(upload)?;
    let cliente = match repo.update_cliente_imagen(dni, &url) {
        Ok(cliente) => cliente,
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

    cache.put(dni.clone(), cliente.clone());
    Ok(cliente)
}
