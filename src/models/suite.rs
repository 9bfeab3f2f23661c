use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{HttpMethod, RequestForm, TestCase};

/// Suite guardada localmente: la configuración del endpoint y las pruebas generadas
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SavedSuite {
    /// Milisegundos desde la época Unix en el momento de guardar
    pub id: u64,
    pub name: String,
    pub endpoint: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: String,
    #[serde(default)]
    pub body: String,
    pub tests: Vec<TestCase>,
    pub timestamp: DateTime<Utc>,
}

impl SavedSuite {
    /// Crea una suite a partir del formulario actual y sus pruebas
    pub fn new(name: impl Into<String>, form: &RequestForm, tests: Vec<TestCase>) -> Self {
        let timestamp = Utc::now();

        Self {
            id: timestamp.timestamp_millis().max(0) as u64,
            name: name.into(),
            endpoint: form.endpoint.clone(),
            method: form.method,
            headers: form.headers.clone(),
            body: form.body.clone(),
            tests,
            timestamp,
        }
    }

    /// Reconstruye el formulario guardado
    pub fn form(&self) -> RequestForm {
        RequestForm {
            endpoint: self.endpoint.clone(),
            method: self.method,
            headers: self.headers.clone(),
            body: self.body.clone(),
        }
    }
}
