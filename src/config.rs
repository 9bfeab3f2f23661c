use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_DATA_DIR: &str = ".apibeast";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuración del cliente
#[derive(Clone, Debug)]
pub struct Config {
    /// URL base del backend, sin barra final
    pub api_base_url: String,
    /// Directorio donde se guardan las suites
    pub data_dir: PathBuf,
    /// Directorio donde se escriben las exportaciones
    pub export_dir: PathBuf,
    /// Tiempo máximo de espera por petición al backend
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            export_dir: PathBuf::from("."),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Carga la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(url) = env::var("APIBEAST_API_URL") {
            config = config.with_api_url(url);
        }
        if let Ok(dir) = env::var("APIBEAST_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(dir) = env::var("APIBEAST_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }
        if let Ok(secs) = env::var("APIBEAST_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|_| {
                AppError::Config(format!("APIBEAST_TIMEOUT_SECS must be a number, got '{}'", secs))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn suites_dir(&self) -> PathBuf {
        self.data_dir.join("suites")
    }
}
