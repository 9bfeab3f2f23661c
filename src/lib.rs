//! Cliente de línea de comandos para APIBeast.
//!
//! Describe un endpoint HTTP, pide al backend que genere casos de prueba,
//! los ejecuta a través del mismo backend y exporta los resultados (JSON,
//! CSV, colección Postman o texto plano). Las suites con nombre se guardan
//! localmente.

pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod utils;

pub use client::{BackendClient, HealthStatus};
pub use config::Config;
pub use error::{AppError, Result};
pub use session::Session;
