//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (well-formed DNI, normalized email,
//! E.164 phone numbers, non-empty labels) so that once a value reaches the
//! domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::str::FromStr;

use phonenumber::{Mode, country};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// DNI is not eight digits followed by its control letter.
    #[error("invalid dni")]
    InvalidDni,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Phone number could not be parsed or is not a valid number.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Postal code is not five digits.
    #[error("invalid postal code")]
    InvalidPostalCode,
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
}

/// Control letters indexed by `dni_number % 23`.
const DNI_LETTERS: &[u8; 23] = b"TRWAGMYFPDXBNJZSQVHLCKE";

/// Spanish national identity number, the natural key of a cliente.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dni(String);

impl Dni {
    /// Upper-cases the input and checks the digits against the control letter.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = value.into().trim().to_uppercase();
        let (digits, letter) = normalized
            .split_at_checked(8)
            .ok_or(TypeConstraintError::InvalidDni)?;

        if letter.len() != 1 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypeConstraintError::InvalidDni);
        }

        let number: u32 = digits
            .parse()
            .map_err(|_| TypeConstraintError::InvalidDni)?;
        let expected = DNI_LETTERS[(number % 23) as usize];

        if letter.as_bytes()[0] != expected {
            return Err(TypeConstraintError::InvalidDni);
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for Dni {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for Dni {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Dni {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique identifier for a vehiculo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehiculoId(Uuid);

impl VehiculoId {
    /// Generate a new random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VehiculoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for VehiculoId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl Display for VehiculoId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for VehiculoId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidUuid)
    }
}

/// Lower-cased and validated contact email of a cliente.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClienteEmail(String);

impl ClienteEmail {
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ClienteEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalizes a phone number to E.164, reading national numbers as Spanish.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = phonenumber::parse(Some(country::Id::ES), trimmed)
        .map_err(|_| TypeConstraintError::InvalidPhone)?;
    if !phonenumber::is_valid(&parsed) {
        return Err(TypeConstraintError::InvalidPhone);
    }
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Five digit Spanish postal code.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CodigoPostal(String);

impl CodigoPostal {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.len() == 5 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(trimmed))
        } else {
            Err(TypeConstraintError::InvalidPostalCode)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

non_empty_string_newtype!(Nombre, "Given name of a cliente.");
non_empty_string_newtype!(Apellido, "Family name of a cliente.");
non_empty_string_newtype!(Direccion, "Postal address of a cliente.");
non_empty_string_newtype!(Marca, "Vehicle brand.");
non_empty_string_newtype!(Modelo, "Vehicle model name.");
non_empty_string_newtype!(Categoria, "Vehicle category label.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dni_accepts_matching_control_letter() {
        assert_eq!(Dni::new("12345678Z").unwrap().as_str(), "12345678Z");
        assert_eq!(Dni::new(" 00000000t ").unwrap().as_str(), "00000000T");
    }

    #[test]
    fn dni_rejects_wrong_letter_or_shape() {
        assert_eq!(Dni::new("12345678A"), Err(TypeConstraintError::InvalidDni));
        assert_eq!(Dni::new("1234567Z"), Err(TypeConstraintError::InvalidDni));
        assert_eq!(Dni::new("1234567XZ"), Err(TypeConstraintError::InvalidDni));
        assert_eq!(Dni::new(""), Err(TypeConstraintError::InvalidDni));
        assert_eq!(Dni::new("12345678ZZ"), Err(TypeConstraintError::InvalidDni));
    }

    #[test]
    fn vehiculo_id_parses_uuid_strings() {
        let id = VehiculoId::new();
        let parsed: VehiculoId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(
            "not-a-uuid".parse::<VehiculoId>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }

    #[test]
    fn email_is_normalized() {
        let email = ClienteEmail::new("  Ana@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ana@example.com");
        assert!(ClienteEmail::new("nope").is_err());
    }

    #[test]
    fn national_phone_numbers_default_to_spain() {
        let phone = PhoneNumber::new("612 345 678").unwrap();
        assert_eq!(phone.as_str(), "+34612345678");
        assert_eq!(
            PhoneNumber::new("   "),
            Err(TypeConstraintError::EmptyString)
        );
    }

    #[test]
    fn postal_code_requires_five_digits() {
        assert!(CodigoPostal::new("28001").is_ok());
        assert!(CodigoPostal::new("2800").is_err());
        assert!(CodigoPostal::new("28a01").is_err());
    }

    #[test]
    fn labels_are_trimmed_and_non_empty() {
        assert_eq!(Marca::new("  Seat ").unwrap().as_str(), "Seat");
        assert_eq!(Modelo::new(" "), Err(TypeConstraintError::EmptyString));
    }
}
