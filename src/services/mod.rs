//! Use cases behind the HTTP handlers.
//!
//! Services are plain functions generic over the repository traits, the cache
//! and the image storage so they can run against mocks in tests.

pub mod cliente;
pub mod errors;
pub mod vehiculo;

pub use errors::{ServiceError, ServiceResult};
