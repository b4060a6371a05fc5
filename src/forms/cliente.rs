use serde::Deserialize;
use validator::Validate;

use crate::domain::cliente::{NewCliente, UpdateCliente};
use crate::domain::types::{
    Apellido, ClienteEmail, CodigoPostal, Direccion, Dni, Nombre, PhoneNumber,
};
use crate::forms::FieldErrors;

const MSG_DNI: &str = "El DNI debe tener 8 dígitos y una letra válida";
const MSG_NOMBRE: &str = "El nombre no puede estar vacío";
const MSG_APELLIDO: &str = "El apellido no puede estar vacío";
const MSG_DIRECCION: &str = "La dirección no puede estar vacía";
const MSG_CODIGO_POSTAL: &str = "El código postal debe tener 5 dígitos";
const MSG_TELEFONO: &str = "El teléfono no es válido";
const MSG_CORREO: &str = "El correo no es válido";

/// Body of `POST /api/clientes`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClienteCreateRequest {
    #[validate(required(message = "El DNI es obligatorio"))]
    pub dni: Option<String>,
    #[validate(required(message = "El nombre es obligatorio"))]
    pub nombre: Option<String>,
    #[validate(required(message = "El apellido es obligatorio"))]
    pub apellido: Option<String>,
    #[validate(required(message = "La dirección es obligatoria"))]
    pub direccion: Option<String>,
    #[validate(required(message = "El código postal es obligatorio"))]
    pub codigo_postal: Option<String>,
    #[validate(required(message = "El teléfono es obligatorio"))]
    pub telefono: Option<String>,
    #[validate(
        required(message = "El correo es obligatorio"),
        email(message = "El correo no es válido")
    )]
    pub correo: Option<String>,
    #[validate(url(message = "La imagen debe ser una URL"))]
    pub imagen: Option<String>,
}

impl ClienteCreateRequest {
    /// Validates the body and builds the domain payload.
    pub fn into_domain(self) -> Result<NewCliente, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };

        let dni = errors.check("dni", self.dni, MSG_DNI, Dni::new);
        let nombre = errors.check("nombre", self.nombre, MSG_NOMBRE, Nombre::new);
        let apellido = errors.check("apellido", self.apellido, MSG_APELLIDO, Apellido::new);
        let direccion = errors.check("direccion", self.direccion, MSG_DIRECCION, Direccion::new);
        let codigo_postal = errors.check(
            "codigo_postal",
            self.codigo_postal,
            MSG_CODIGO_POSTAL,
            CodigoPostal::new,
        );
        let telefono = errors.check("telefono", self.telefono, MSG_TELEFONO, PhoneNumber::new);
        let correo = errors.check("correo", self.correo, MSG_CORREO, ClienteEmail::new);

        match (dni, nombre, apellido, direccion, codigo_postal, telefono, correo) {
            (
                Some(dni),
                Some(nombre),
                Some(apellido),
                Some(direccion),
                Some(codigo_postal),
                Some(telefono),
                Some(correo),
            ) if errors.is_empty() => Ok(NewCliente {
                dni,
                nombre,
                apellido,
                direccion,
                codigo_postal,
                telefono,
                correo,
                imagen: self.imagen,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT`/`PATCH /api/clientes/{id}`; absent fields are left as is.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClienteUpdateRequest {
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub direccion: Option<String>,
    pub codigo_postal: Option<String>,
    pub telefono: Option<String>,
    #[validate(email(message = "El correo no es válido"))]
    pub correo: Option<String>,
}

impl ClienteUpdateRequest {
    pub fn into_domain(self) -> Result<UpdateCliente, FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(&e),
        };

        let updates = UpdateCliente {
            nombre: errors.check("nombre", self.nombre, MSG_NOMBRE, Nombre::new),
            apellido: errors.check("apellido", self.apellido, MSG_APELLIDO, Apellido::new),
            direccion: errors.check("direccion", self.direccion, MSG_DIRECCION, Direccion::new),
            codigo_postal: errors.check(
                "codigo_postal",
                self.codigo_postal,
                MSG_CODIGO_POSTAL,
                CodigoPostal::new,
            ),
            telefono: errors.check("telefono", self.telefono, MSG_TELEFONO, PhoneNumber::new),
            correo: errors.check("correo", self.correo, MSG_CORREO, ClienteEmail::new),
        };

        errors.into_result(updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ClienteCreateRequest {
        ClienteCreateRequest {
            dni: Some("12345678z".to_string()),
            nombre: Some("Ana".to_string()),
            apellido: Some("García".to_string()),
            direccion: Some("Calle Mayor 1".to_string()),
            codigo_postal: Some("28013".to_string()),
            telefono: Some("612345678".to_string()),
            correo: Some("Ana@Example.com".to_string()),
            imagen: None,
        }
    }

    #[test]
    fn complete_request_builds_normalized_cliente() {
        let cliente = complete().into_domain().unwrap();
        assert_eq!(cliente.dni.as_str(), "12345678Z");
        assert_eq!(cliente.telefono.as_str(), "+34612345678");
        assert_eq!(cliente.correo.as_str(), "ana@example.com");
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let request = ClienteCreateRequest {
            nombre: None,
            codigo_postal: None,
            ..complete()
        };
        let errors = request.into_domain().unwrap_err();
        assert_eq!(errors.get("nombre"), Some("El nombre es obligatorio"));
        assert_eq!(
            errors.get("codigoPostal"),
            Some("El código postal es obligatorio")
        );
        assert!(!errors.contains("dni"));
    }

    #[test]
    fn malformed_values_are_reported() {
        let request = ClienteCreateRequest {
            dni: Some("12345678A".to_string()),
            nombre: Some("   ".to_string()),
            ..complete()
        };
        let errors = request.into_domain().unwrap_err();
        assert_eq!(errors.get("dni"), Some(MSG_DNI));
        assert_eq!(errors.get("nombre"), Some(MSG_NOMBRE));
    }

    #[test]
    fn invalid_email_keeps_first_message() {
        let request = ClienteCreateRequest {
            correo: Some("no-es-correo".to_string()),
            ..complete()
        };
        let errors = request.into_domain().unwrap_err();
        assert_eq!(errors.get("correo"), Some("El correo no es válido"));
    }

    #[test]
    fn empty_update_is_valid() {
        let updates = ClienteUpdateRequest::default().into_domain().unwrap();
        assert!(updates.is_empty());
    }

    #[test]
    fn update_checks_present_fields_only() {
        let request = ClienteUpdateRequest {
            codigo_postal: Some("1".to_string()),
            nombre: Some("Lucía".to_string()),
            ..Default::default()
        };
        let errors = request.into_domain().unwrap_err();
        assert_eq!(errors.get("codigoPostal"), Some(MSG_CODIGO_POSTAL));
        assert!(!errors.contains("nombre"));
    }
}
