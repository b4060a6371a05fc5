use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::vehiculo::Vehiculo;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehiculoResponse {
    pub id: Uuid,
    pub marca: String,
    pub categoria: String,
    pub modelo: String,
    pub year: i32,
    pub km: f64,
    pub precio: f64,
    pub stock: i32,
    pub is_deleted: bool,
    pub imagen: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Vehiculo> for VehiculoResponse {
    fn from(vehiculo: Vehiculo) -> Self {
        Self {
            id: *vehiculo.id.as_uuid(),
            marca: vehiculo.marca,
            categoria: vehiculo.categoria,
            modelo: vehiculo.modelo,
            year: vehiculo.year,
            km: vehiculo.km,
            precio: vehiculo.precio,
            stock: vehiculo.stock,
            is_deleted: vehiculo.is_deleted,
            imagen: vehiculo.imagen,
            created_at: vehiculo.created_at,
            updated_at: vehiculo.updated_at,
        }
    }
}
