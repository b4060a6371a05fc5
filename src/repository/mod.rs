use serde::Deserialize;

use crate::db::{DbConnection, DbPool};
use crate::domain::cliente::{Cliente, NewCliente, UpdateCliente};
use crate::domain::types::{Dni, VehiculoId};
use crate::domain::vehiculo::{NewVehiculo, UpdateVehiculo, Vehiculo, VehiculoFilter};
use crate::pagination::{PageRequest, SortDirection};
use crate::repository::errors::RepositoryResult;

pub mod cliente;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod vehiculo;

/// Columns a vehiculo listing can be ordered by.
///
/// Deserializes from the camelCase names clients send in `sortBy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VehiculoSortField {
    #[default]
    Id,
    Marca,
    Categoria,
    Modelo,
    Year,
    Km,
    Precio,
    Stock,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

impl VehiculoSortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Marca => "marca",
            Self::Categoria => "categoria",
            Self::Modelo => "modelo",
            Self::Year => "year",
            Self::Km => "km",
            Self::Precio => "precio",
            Self::Stock => "stock",
            Self::IsDeleted => "isDeleted",
            Self::CreatedAt => "createdAt",
            Self::UpdatedAt => "updatedAt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehiculoListQuery {
    pub filter: VehiculoFilter,
    pub sort_by: VehiculoSortField,
    pub direction: SortDirection,
    pub pagination: Option<PageRequest>,
}

impl VehiculoListQuery {
    pub fn new(filter: VehiculoFilter) -> Self {
        Self {
            filter,
            sort_by: VehiculoSortField::default(),
            direction: SortDirection::default(),
            pagination: None,
        }
    }

    pub fn sort(mut self, sort_by: VehiculoSortField, direction: SortDirection) -> Self {
        self.sort_by = sort_by;
        self.direction = direction;
        self
    }

    pub fn paginate(mut self, page: u32, size: u32) -> Self {
        self.pagination = Some(PageRequest::new(page, size));
        self
    }
}

pub trait ClienteReader {
    fn get_cliente_by_dni(&self, dni: &Dni) -> RepositoryResult<Option<Cliente>>;
    fn list_clientes(&self) -> RepositoryResult<Vec<Cliente>>;
}

pub trait ClienteWriter {
    fn create_cliente(&self, new_cliente: &NewCliente) -> RepositoryResult<Cliente>;
    fn update_cliente(&self, dni: &Dni, updates: &UpdateCliente) -> RepositoryResult<Cliente>;
    fn update_cliente_imagen(&self, dni: &Dni, imagen: &str) -> RepositoryResult<Cliente>;
    fn delete_cliente(&self, dni: &Dni) -> RepositoryResult<()>;
}

pub trait VehiculoReader {
    fn get_vehiculo_by_id(&self, id: VehiculoId) -> RepositoryResult<Option<Vehiculo>>;
    /// Returns the total number of matches and the requested page of them.
    fn list_vehiculos(&self, query: VehiculoListQuery) -> RepositoryResult<(usize, Vec<Vehiculo>)>;
}

pub trait VehiculoWriter {
    fn create_vehiculo(&self, new_vehiculo: &NewVehiculo) -> RepositoryResult<Vehiculo>;
    fn update_vehiculo(&self, id: VehiculoId, updates: &UpdateVehiculo)
    -> RepositoryResult<Vehiculo>;
    fn update_vehiculo_imagen(&self, id: VehiculoId, imagen: &str) -> RepositoryResult<Vehiculo>;
    /// Sets the soft-delete flag.
    fn delete_vehiculo(&self, id: VehiculoId) -> RepositoryResult<()>;
}

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        match self.pool.get() {
            Ok(conn) => Ok(conn),
            Err(e) => {
                log::error!("Failed to get connection from pool: {e}");
                Err(e.into())
            }
        }
    }
}
