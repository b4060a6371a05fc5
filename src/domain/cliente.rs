use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    Apellido, ClienteEmail, CodigoPostal, Direccion, Dni, Nombre, PhoneNumber,
};

/// A stored cliente.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cliente {
    pub dni: Dni,
    pub nombre: String,
    pub apellido: String,
    pub direccion: String,
    pub codigo_postal: String,
    pub telefono: String,
    pub correo: String,
    /// Public URL of the attached image, if any.
    pub imagen: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Validated payload for inserting a cliente.
#[derive(Clone, Debug, PartialEq)]
pub struct NewCliente {
    pub dni: Dni,
    pub nombre: Nombre,
    pub apellido: Apellido,
    pub direccion: Direccion,
    pub codigo_postal: CodigoPostal,
    pub telefono: PhoneNumber,
    pub correo: ClienteEmail,
    pub imagen: Option<String>,
}

/// Partial update for a cliente; `None` keeps the stored value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateCliente {
    pub nombre: Option<Nombre>,
    pub apellido: Option<Apellido>,
    pub direccion: Option<Direccion>,
    pub codigo_postal: Option<CodigoPostal>,
    pub telefono: Option<PhoneNumber>,
    pub correo: Option<ClienteEmail>,
}

impl UpdateCliente {
    /// True when the update would not touch any column.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
