//! Database models and configuration structures.

pub mod cliente;
pub mod config;
pub mod vehiculo;
