use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errores de la aplicación
#[derive(Debug, Error)]
pub enum AppError {
    /// El formulario no se puede enviar tal como está
    #[error("{0}")]
    Validation(String),

    /// El backend respondió, pero con `success: false` o un estado de error
    #[error("{message}")]
    Backend {
        status: Option<u16>,
        message: String,
    },

    /// No se pudo hablar con el backend
    #[error("Failed to connect to server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("suite {0} not found")]
    SuiteNotFound(u64),

    #[error("I/O error on {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::Storage {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
