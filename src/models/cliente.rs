use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cliente::{
    Cliente as DomainCliente, NewCliente as DomainNewCliente,
    UpdateCliente as DomainUpdateCliente,
};
use crate::domain::types::{Dni, TypeConstraintError};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::clientes)]
/// Diesel model for [`crate::domain::cliente::Cliente`].
pub struct Cliente {
    pub dni: String,
    pub nombre: String,
    pub apellido: String,
    pub direccion: String,
    pub codigo_postal: String,
    pub telefono: String,
    pub correo: String,
    pub imagen: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clientes)]
/// Insertable form of [`Cliente`].
pub struct NewCliente<'a> {
    pub dni: &'a str,
    pub nombre: &'a str,
    pub apellido: &'a str,
    pub direccion: &'a str,
    pub codigo_postal: &'a str,
    pub telefono: &'a str,
    pub correo: &'a str,
    pub imagen: Option<&'a str>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::clientes)]
/// Columns touched by a partial update. `None` fields are skipped.
pub struct UpdateCliente<'a> {
    pub nombre: Option<&'a str>,
    pub apellido: Option<&'a str>,
    pub direccion: Option<&'a str>,
    pub codigo_postal: Option<&'a str>,
    pub telefono: Option<&'a str>,
    pub correo: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Cliente> for DomainCliente {
    type Error = TypeConstraintError;

    fn try_from(cliente: Cliente) -> Result<Self, Self::Error> {
        Ok(Self {
            dni: Dni::new(cliente.dni)?,
            nombre: cliente.nombre,
            apellido: cliente.apellido,
            direccion: cliente.direccion,
            codigo_postal: cliente.codigo_postal,
            telefono: cliente.telefono,
            correo: cliente.correo,
            imagen: cliente.imagen,
            created_at: cliente.created_at,
            updated_at: cliente.updated_at,
        })
    }
}

impl<'a> NewCliente<'a> {
    pub fn from_domain(cliente: &'a DomainNewCliente, now: NaiveDateTime) -> Self {
        Self {
            dni: cliente.dni.as_str(),
            nombre: cliente.nombre.as_str(),
            apellido: cliente.apellido.as_str(),
            direccion: cliente.direccion.as_str(),
            codigo_postal: cliente.codigo_postal.as_str(),
            telefono: cliente.telefono.as_str(),
            correo: cliente.correo.as_str(),
            imagen: cliente.imagen.as_deref(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl<'a> UpdateCliente<'a> {
    pub fn from_domain(updates: &'a DomainUpdateCliente, now: NaiveDateTime) -> Self {
        Self {
            nombre: updates.nombre.as_ref().map(|v| v.as_str()),
            apellido: updates.apellido.as_ref().map(|v| v.as_str()),
            direccion: updates.direccion.as_ref().map(|v| v.as_str()),
            codigo_postal: updates.codigo_postal.as_ref().map(|v| v.as_str()),
            telefono: updates.telefono.as_ref().map(|v| v.as_str()),
            correo: updates.correo.as_ref().map(|v| v.as_str()),
            updated_at: now,
        }
    }
}
