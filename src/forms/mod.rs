//! Request bodies, query parameters and multipart forms accepted by the API.
//!
//! Every form is checked with `validator` first; value-object construction
//! then adds its own failures. Both end up in a [`FieldErrors`] map keyed by
//! the JSON field name.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod cliente;
pub mod image;
pub mod vehiculo;

/// Field name to the first validation message reported for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `field` already has one.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(to_camel_case(field))
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok(value)` when no field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Runs a value-object constructor on an optional input, recording a
    /// failure under `field`.
    pub(crate) fn check<T, V>(
        &mut self,
        field: &str,
        value: Option<V>,
        message: &str,
        build: impl FnOnce(V) -> Result<T, TypeConstraintError>,
    ) -> Option<T> {
        match build(value?) {
            Ok(built) => Some(built),
            Err(err) => {
                log::debug!("Field {field} rejected: {err}");
                self.insert(field, message);
                None
            }
        }
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = Self::new();
        // Sort so the first message per field does not depend on hash order.
        let mut entries: Vec<_> = errors.field_errors().into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, field_errors) in entries {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                fields.insert(&field, message);
            }
        }
        fields
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{joined}")
    }
}

/// Converts `codigo_postal` into `codigoPostal`.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use validator::ValidationError;

    use super::*;

    #[test]
    fn camel_case_conversion() {
        assert_eq!(to_camel_case("codigo_postal"), "codigoPostal");
        assert_eq!(to_camel_case("marca"), "marca");
        assert_eq!(to_camel_case("is_deleted"), "isDeleted");
    }

    #[test]
    fn first_message_per_field_wins() {
        let mut errors = FieldErrors::new();
        errors.insert("nombre", "primero");
        errors.insert("nombre", "segundo");
        assert_eq!(errors.get("nombre"), Some("primero"));
    }

    #[test]
    fn validation_errors_use_message_or_code() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "codigo_postal",
            ValidationError::new("length").with_message("demasiado corto".into()),
        );
        errors.add("marca", ValidationError::new("required"));

        let fields = FieldErrors::from(&errors);
        assert_eq!(fields.get("codigoPostal"), Some("demasiado corto"));
        assert_eq!(fields.get("marca"), Some("required"));
    }

    #[test]
    fn into_result_reports_failures() {
        assert_eq!(FieldErrors::new().into_result(3), Ok(3));
        let mut errors = FieldErrors::new();
        errors.insert("km", "negativo");
        assert!(errors.into_result(()).is_err());
    }

    #[test]
    fn serializes_as_flat_map() {
        let mut errors = FieldErrors::new();
        errors.insert("stock", "requerido");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({"stock": "requerido"}));
    }
}
