use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::cliente::Cliente;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClienteResponse {
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

impl From<Cliente> for ClienteResponse {
    fn from(cliente: Cliente) -> Self {
        Self {
            dni: cliente.dni.into_inner(),
            nombre: cliente.nombre,
            apellido: cliente.apellido,
            direccion: cliente.direccion,
            codigo_postal: cliente.codigo_postal,
            telefono: cliente.telefono,
            correo: cliente.correo,
            imagen: cliente.imagen,
            created_at: cliente.created_at,
            updated_at: cliente.updated_at,
        }
    }
}
