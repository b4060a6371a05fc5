//! Configuration model loaded from external sources.

use serde::Deserialize;

/// Settings read from `config/*.yaml` and `APP_*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub database_url: String,
    /// Path prefix of the vehiculo resource, e.g. `/v1`.
    pub api_version: String,
    /// Directory uploaded images are written to and served from.
    pub upload_dir: String,
}
