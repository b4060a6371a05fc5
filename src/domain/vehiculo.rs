use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Categoria, Marca, Modelo, VehiculoId};

/// A stored vehiculo.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Vehiculo {
    pub id: VehiculoId,
    pub marca: String,
    pub categoria: String,
    pub modelo: String,
    pub year: i32,
    pub km: f64,
    pub precio: f64,
    pub stock: i32,
    /// Soft-delete flag; deleted vehiculos stay in the table.
    pub is_deleted: bool,
    pub imagen: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated payload for inserting a vehiculo.
#[derive(Clone, Debug, PartialEq)]
pub struct NewVehiculo {
    pub id: VehiculoId,
    pub marca: Marca,
    pub categoria: Categoria,
    pub modelo: Modelo,
    pub year: i32,
    pub km: f64,
    pub precio: f64,
    pub stock: i32,
    pub imagen: Option<String>,
}

/// Partial update for a vehiculo; `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateVehiculo {
    pub marca: Option<Marca>,
    pub categoria: Option<Categoria>,
    pub modelo: Option<Modelo>,
    pub year: Option<i32>,
    pub km: Option<f64>,
    pub precio: Option<f64>,
    pub stock: Option<i32>,
    pub is_deleted: Option<bool>,
}

/// Optional constraints applied when listing vehiculos.
///
/// Every `None` field leaves that column unconstrained. Text and flag filters
/// match exactly; numeric filters are inclusive one-sided bounds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VehiculoFilter {
    pub marca: Option<String>,
    pub categoria: Option<String>,
    pub modelo: Option<String>,
    /// Lower bound on `year`.
    pub min_year: Option<i32>,
    pub is_deleted: Option<bool>,
    /// Upper bound on `km`.
    pub km_max: Option<f64>,
    /// Upper bound on `precio`.
    pub precio_max: Option<f64>,
    /// Lower bound on `stock`.
    pub stock_min: Option<i32>,
}
