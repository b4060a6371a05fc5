use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, VehiculoId};
use crate::domain::vehiculo::{
    NewVehiculo as DomainNewVehiculo, UpdateVehiculo as DomainUpdateVehiculo,
    Vehiculo as DomainVehiculo,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vehiculos)]
/// Diesel model for [`crate::domain::vehiculo::Vehiculo`].
pub struct Vehiculo {
    pub id: String,
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

#[derive(Insertable)]
#[diesel(table_name = crate::schema::vehiculos)]
pub struct NewVehiculo<'a> {
    pub id: String,
    pub marca: &'a str,
    pub categoria: &'a str,
    pub modelo: &'a str,
    pub year: i32,
    pub km: f64,
    pub precio: f64,
    pub stock: i32,
    pub is_deleted: bool,
    pub imagen: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::vehiculos)]
pub struct UpdateVehiculo<'a> {
    pub marca: Option<&'a str>,
    pub categoria: Option<&'a str>,
    pub modelo: Option<&'a str>,
    pub year: Option<i32>,
    pub km: Option<f64>,
    pub precio: Option<f64>,
    pub stock: Option<i32>,
    pub is_deleted: Option<bool>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Vehiculo> for DomainVehiculo {
    type Error = TypeConstraintError;

    fn try_from(vehiculo: Vehiculo) -> Result<Self, Self::Error> {
        Ok(Self {
            id: vehiculo.id.parse::<VehiculoId>()?,
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
        })
    }
}

impl<'a> NewVehiculo<'a> {
    pub fn from_domain(vehiculo: &'a DomainNewVehiculo, now: NaiveDateTime) -> Self {
        Self {
            id: vehiculo.id.to_string(),
            marca: vehiculo.marca.as_str(),
            categoria: vehiculo.categoria.as_str(),
            modelo: vehiculo.modelo.as_str(),
            year: vehiculo.year,
            km: vehiculo.km,
            precio: vehiculo.precio,
            stock: vehiculo.stock,
            is_deleted: false,
            imagen: vehiculo.imagen.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateVehiculo<'a> {
    pub fn from_domain(updates: &'a DomainUpdateVehiculo, now: NaiveDateTime) -> Self {
        Self {
            marca: updates.marca.as_ref().map(|v| v.as_str()),
            categoria: updates.categoria.as_ref().map(|v| v.as_str()),
            modelo: updates.modelo.as_ref().map(|v| v.as_str()),
            year: updates.year,
            km: updates.km,
            precio: updates.precio,
            stock: updates.stock,
            is_deleted: updates.is_deleted,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::types::{Categoria, Marca, Modelo};

    #[test]
    fn new_vehiculo_starts_not_deleted() {
        let domain = DomainNewVehiculo {
            id: VehiculoId::new(),
            marca: Marca::new("Seat").unwrap(),
            categoria: Categoria::new("Familiar").unwrap(),
            modelo: Modelo::new("Leon").unwrap(),
            year: 2020,
            km: 1200.0,
            precio: 18000.0,
            stock: 3,
            imagen: None,
        };
        let row = NewVehiculo::from_domain(&domain, Utc::now().naive_utc());
        assert_eq!(row.id, domain.id.to_string());
        assert!(!row.is_deleted);
        assert_eq!(row.marca, "Seat");
    }

    #[test]
    fn row_id_must_be_a_uuid() {
        let now = Utc::now().naive_utc();
        let row = Vehiculo {
            id: "42".to_string(),
            marca: "m".to_string(),
            categoria: "c".to_string(),
            modelo: "m".to_string(),
            year: 2000,
            km: 0.0,
            precio: 0.0,
            stock: 0,
            is_deleted: false,
            imagen: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainVehiculo::try_from(row),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
