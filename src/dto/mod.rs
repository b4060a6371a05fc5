//! JSON representations returned by the API.

pub mod cliente;
pub mod vehiculo;
