use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{Categoria, Marca, Modelo, VehiculoId};
use crate::domain::vehiculo::{NewVehiculo, UpdateVehiculo, VehiculoFilter};
use crate::forms::FieldErrors;
use crate::pagination::{DEFAULT_PAGE_SIZE, SortDirection};
use crate::repository::{VehiculoListQuery, VehiculoSortField};

const MSG_MARCA: &str = "La marca no puede estar vacía";
const MSG_CATEGORIA: &str = "La categoría no puede estar vacía";
const MSG_MODELO: &str = "El modelo no puede estar vacío";

/// Body of `POST {api-version}/vehiculos`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehiculoCreateDto {
    #[validate(required(message = "La marca es obligatoria"))]
    pub marca: Option<String>,
    #[validate(required(message = "La categoría es obligatoria"))]
    pub categoria: Option<String>,
    #[validate(required(message = "El modelo es obligatorio"))]
    pub modelo: Option<String>,
    #[validate(
        required(message = "El año es obligatorio"),
        range(min = 1900, message = "El año debe ser posterior a 1900")
    )]
    pub year: Option<i32>,
    #[validate(
        required(message = "Los km son obligatorios"),
        range(min = 0.0, message = "Los km no pueden ser negativos")
    )]
    pub km: Option<f64>,
    #[validate(
        required(message = "El precio es obligatorio"),
        range(min = 0.0, message = "El precio no puede ser negativo")
    )]
    pub precio: Option<f64>,
    #[validate(
        required(message = "El stock es obligatorio"),
        range(min = 0, message = "El stock no puede ser negativo")
    )]
    pub stock: Option<i32>,
    #[validate(url(message = "La imagen debe ser una URL"))]
    pub imagen: Option<String>,
}

impl VehiculoCreateDto {
    pub fn into_domain(self) -> Result<NewVehiculo, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };

        let marca = errors.check("marca", self.marca, MSG_MARCA, Marca::new);
        let categoria = errors.check("categoria", self.categoria, MSG_CATEGORIA, Categoria::new);
        let modelo = errors.check("modelo", self.modelo, MSG_MODELO, Modelo::new);

        match (
            marca, categoria, modelo, self.year, self.km, self.precio, self.stock,
        ) {
            (
                Some(marca),
                Some(categoria),
                Some(modelo),
                Some(year),
                Some(km),
                Some(precio),
                Some(stock),
            ) if errors.is_empty() => Ok(NewVehiculo {
                id: VehiculoId::new(),
                marca,
                categoria,
                modelo,
                year,
                km,
                precio,
                stock,
                imagen: self.imagen,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT`/`PATCH {api-version}/vehiculos/{id}`; absent fields are left as is.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehiculoUpdateDto {
    pub marca: Option<String>,
    pub categoria: Option<String>,
    pub modelo: Option<String>,
    #[validate(range(min = 1900, message = "El año debe ser posterior a 1900"))]
    pub year: Option<i32>,
    #[validate(range(min = 0.0, message = "Los km no pueden ser negativos"))]
    pub km: Option<f64>,
    #[validate(range(min = 0.0, message = "El precio no puede ser negativo"))]
    pub precio: Option<f64>,
    #[validate(range(min = 0, message = "El stock no puede ser negativo"))]
    pub stock: Option<i32>,
    pub is_deleted: Option<bool>,
}

impl VehiculoUpdateDto {
    pub fn into_domain(self) -> Result<UpdateVehiculo, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };

        let updates = UpdateVehiculo {
            marca: errors.check("marca", self.marca, MSG_MARCA, Marca::new),
            categoria: errors.check("categoria", self.categoria, MSG_CATEGORIA, Categoria::new),
            modelo: errors.check("modelo", self.modelo, MSG_MODELO, Modelo::new),
            year: self.year,
            km: self.km,
            precio: self.precio,
            stock: self.stock,
            is_deleted: self.is_deleted,
        };

        errors.into_result(updates)
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_direction() -> String {
    "asc".to_string()
}

/// Query string of `GET {api-version}/vehiculos`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehiculoListParams {
    pub marca: Option<String>,
    pub categoria: Option<String>,
    pub modelo: Option<String>,
    pub min_year: Option<i32>,
    pub is_delete: Option<bool>,
    pub km_max: Option<f64>,
    pub precio_max: Option<f64>,
    pub stock_min: Option<i32>,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, message = "El tamaño de página debe ser al menos 1"))]
    pub size: u32,
    #[serde(default)]
    pub sort_by: VehiculoSortField,
    #[serde(default = "default_direction")]
    pub direction: String,
}

impl Default for VehiculoListParams {
    fn default() -> Self {
        Self {
            marca: None,
            categoria: None,
            modelo: None,
            min_year: None,
            is_delete: None,
            km_max: None,
            precio_max: None,
            stock_min: None,
            page: 0,
            size: default_page_size(),
            sort_by: VehiculoSortField::default(),
            direction: default_direction(),
        }
    }
}

impl VehiculoListParams {
    pub fn filter(&self) -> VehiculoFilter {
        VehiculoFilter {
            marca: self.marca.clone(),
            categoria: self.categoria.clone(),
            modelo: self.modelo.clone(),
            min_year: self.min_year,
            is_deleted: self.is_delete,
            km_max: self.km_max,
            precio_max: self.precio_max,
            stock_min: self.stock_min,
        }
    }

    /// Validates paging and builds the repository query.
    pub fn to_query(&self) -> Result<VehiculoListQuery, FieldErrors> {
        if let Err(e) = self.validate() {
            return Err(FieldErrors::from(&e));
        }

        Ok(VehiculoListQuery::new(self.filter())
            .sort(self.sort_by, SortDirection::parse(&self.direction))
            .paginate(self.page, self.size))
    }
}
