//! Domain aggregates exposed by the service layer.

pub mod cliente;
pub mod types;
pub mod vehiculo;
