use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Caso de prueba generado por el backend.
///
/// El cliente sólo interpreta los campos que muestra; el resto (`endpoint`,
/// `headers`, `body`, `assertions`...) se guarda en `extra` y se devuelve
/// intacto al backend cuando se piden ejecutar las pruebas.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestCase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub method: String,
    pub expected_status: u16,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TestCase {
    /// URL de la prueba, si el backend la incluyó
    pub fn endpoint(&self) -> Option<&str> {
        self.extra.get("endpoint").and_then(Value::as_str)
    }

    /// Cabeceras de la prueba; los valores que no son texto se ignoran
    pub fn headers(&self) -> BTreeMap<String, String> {
        self.extra
            .get("headers")
            .and_then(Value::as_object)
            .map(|headers| {
                headers
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cuerpo de la prueba (`null` cuenta como ausente)
    pub fn body(&self) -> Option<&Value> {
        self.extra.get("body").filter(|b| !b.is_null())
    }
}
