use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::ApiTemplate;

/// Métodos HTTP que ofrece el formulario
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    /// Sólo estos métodos envían cuerpo
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported method '{}'", s))
    }
}

/// Contenido del formulario tal como lo escribe el usuario.
///
/// `headers` y `body` se guardan como texto sin procesar; sólo se validan
/// al construir la petición de generación.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct RequestForm {
    pub endpoint: String,
    pub method: HttpMethod,
    #[serde(default)]
    pub headers: String,
    #[serde(default)]
    pub body: String,
}

/// Cuerpo de `POST /generate-tests`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GenerateTestsRequest {
    pub endpoint: String,
    pub method: HttpMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl RequestForm {
    pub fn new(endpoint: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            ..Default::default()
        }
    }

    /// Rellena el formulario con una plantilla
    pub fn from_template(template: &ApiTemplate) -> Self {
        let headers = if template.headers.is_empty() {
            String::new()
        } else {
            serde_json::to_string_pretty(&template.headers).unwrap_or_default()
        };

        Self {
            endpoint: template.endpoint.clone(),
            method: template.method,
            headers,
            body: template.body.clone(),
        }
    }

    /// Indica si hay cabeceras o cuerpo que mostrar en las opciones avanzadas
    pub fn has_advanced(&self) -> bool {
        !self.headers.trim().is_empty() || !self.body.trim().is_empty()
    }

    /// Valida el formulario y construye la petición para el backend
    pub fn build_generate_request(&self) -> Result<GenerateTestsRequest> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() {
            return Err(AppError::validation("Please enter an API endpoint"));
        }

        let headers = if self.headers.trim().is_empty() {
            None
        } else {
            Some(parse_headers(&self.headers)?)
        };

        let body = if !self.body.trim().is_empty() && self.method.allows_body() {
            Some(self.body.clone())
        } else {
            None
        };

        Ok(GenerateTestsRequest {
            endpoint: endpoint.to_string(),
            method: self.method,
            headers,
            body,
        })
    }
}

/// Interpreta el texto de cabeceras como un objeto JSON de texto a texto
fn parse_headers(raw: &str) -> Result<BTreeMap<String, String>> {
    let value: Value =
        serde_json::from_str(raw).map_err(|_| AppError::validation("Invalid JSON in headers"))?;

    let Value::Object(map) = value else {
        return Err(AppError::validation("Headers must be a JSON object"));
    };

    map.into_iter()
        .map(|(name, value)| match value {
            Value::String(value) => Ok((name, value)),
            _ => Err(AppError::validation("Header values must be strings")),
        })
        .collect()
}
