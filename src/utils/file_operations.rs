use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{AppError, Result};
use crate::models::{SavedSuite, TestCase};

/// Almacén de suites guardadas: un archivo JSON por suite
#[derive(Debug, Clone)]
pub struct SuiteStore {
    dir: PathBuf,
}

impl SuiteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Guarda la suite. Si ya existe otra con el mismo id, el id se incrementa
    /// hasta encontrar uno libre; devuelve el id definitivo.
    pub fn save(&self, suite: &mut SavedSuite) -> Result<u64> {
        fs::create_dir_all(&self.dir).map_err(|e| AppError::storage(&self.dir, e))?;

        // Reservar el archivo de forma atómica: `create_new` falla si ya existe
        let (path, mut file) = loop {
            let path = self.path_for(suite.id);
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => break (path, file),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => suite.id += 1,
                Err(e) => return Err(AppError::storage(&path, e)),
            }
        };

        let contents = serde_json::to_string_pretty(suite)?;
        file.write_all(contents.as_bytes())
            .map_err(|e| AppError::storage(&path, e))?;

        info!(id = suite.id, name = %suite.name, path = %path.display(), "suite saved");
        Ok(suite.id)
    }

    /// Lista las suites guardadas, las más recientes primero.
    ///
    /// Los archivos que no se pueden leer se omiten con un aviso.
    pub fn list(&self) -> Result<Vec<SavedSuite>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AppError::storage(&self.dir, e)),
        };

        let mut suites = Vec::new();

        for entry in entries {
            let path = entry.map_err(|e| AppError::storage(&self.dir, e))?.path();

            // Solo incluir archivos JSON
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            match read_suite(&path) {
                Ok(suite) => suites.push(suite),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable suite"),
            }
        }

        suites.sort_by(|a, b| b.id.cmp(&a.id));
        debug!(count = suites.len(), "suites listed");

        Ok(suites)
    }

    pub fn load(&self, id: u64) -> Result<SavedSuite> {
        let path = self.path_for(id);
        if !path.exists() {
            return Err(AppError::SuiteNotFound(id));
        }
        read_suite(&path)
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let path = self.path_for(id);
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(id, "suite deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(AppError::SuiteNotFound(id)),
            Err(e) => Err(AppError::storage(&path, e)),
        }
    }
}

fn read_suite(path: &Path) -> Result<SavedSuite> {
    let contents = fs::read_to_string(path).map_err(|e| AppError::storage(path, e))?;
    Ok(serde_json::from_str(&contents)?)
}

/// Escribe un archivo exportado en `dir` y devuelve su ruta
pub fn write_export(dir: &Path, file_name: &str, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|e| AppError::storage(dir, e))?;

    let path = dir.join(file_name);
    fs::write(&path, contents).map_err(|e| AppError::storage(&path, e))?;

    info!(path = %path.display(), bytes = contents.len(), "export written");
    Ok(path)
}

/// Lee una lista de casos de prueba desde un archivo JSON.
///
/// Acepta tanto un array como la respuesta completa de generación
/// (`{"success": true, "tests": [...]}`).
pub fn load_tests_file(path: &Path) -> Result<Vec<TestCase>> {
    let contents = fs::read_to_string(path).map_err(|e| AppError::storage(path, e))?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    let tests = match value {
        serde_json::Value::Object(mut map) if map.contains_key("tests") => {
            map.remove("tests").unwrap_or_default()
        }
        other => other,
    };

    Ok(serde_json::from_value(tests)?)
}
