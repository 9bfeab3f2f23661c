use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{GenerateTestsRequest, TestCase, TestResult};

/// Respuesta de `POST /generate-tests`
#[derive(Debug, Deserialize)]
struct GenerateTestsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    tests: Vec<TestCase>,
    error: Option<String>,
}

/// Cuerpo de `POST /execute-tests`
#[derive(Debug, Serialize)]
struct ExecuteTestsRequest<'a> {
    tests: &'a [TestCase],
}

/// Respuesta de `POST /execute-tests`
#[derive(Debug, Deserialize)]
struct ExecuteTestsResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    results: Vec<TestResult>,
    error: Option<String>,
}

/// Cuerpo de error que devuelve el backend junto a un 4xx/5xx
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Respuesta de `GET /health`
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub version: String,
}

/// Cliente del backend de APIBeast
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("apibeast/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Pide al backend que genere casos de prueba para el endpoint
    pub async fn generate_tests(&self, request: &GenerateTestsRequest) -> Result<Vec<TestCase>> {
        info!(endpoint = %request.endpoint, method = %request.method, "generating tests");

        let response = self
            .http
            .post(self.url("generate-tests"))
            .json(request)
            .send()
            .await?;
        let body: GenerateTestsResponse = read_envelope(response).await?;

        if !body.success {
            return Err(AppError::Backend {
                status: None,
                message: body
                    .error
                    .unwrap_or_else(|| "Failed to generate tests".to_string()),
            });
        }

        info!(count = body.tests.len(), "tests generated");
        Ok(body.tests)
    }

    /// Pide al backend que ejecute las pruebas contra la API destino
    pub async fn execute_tests(&self, tests: &[TestCase]) -> Result<Vec<TestResult>> {
        info!(count = tests.len(), "executing tests");

        let response = self
            .http
            .post(self.url("execute-tests"))
            .json(&ExecuteTestsRequest { tests })
            .send()
            .await?;
        let body: ExecuteTestsResponse = read_envelope(response).await?;

        if !body.success {
            return Err(AppError::Backend {
                status: None,
                message: body
                    .error
                    .unwrap_or_else(|| "Failed to execute tests".to_string()),
            });
        }

        info!(count = body.results.len(), "tests executed");
        Ok(body.results)
    }

    /// Comprueba que el backend está vivo
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.http.get(self.url("health")).send().await?;
        read_envelope(response).await
    }
}

/// Lee el cuerpo JSON de una respuesta.
///
/// Para estados de error intenta rescatar el campo `error` del backend antes
/// de recurrir a un mensaje genérico con el código de estado.
async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;
    debug!(status = status.as_u16(), body = %text, "backend response");

    if !status.is_success() {
        let message = serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
            .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()));
        warn!(status = status.as_u16(), %message, "backend returned an error");

        return Err(AppError::Backend {
            status: Some(status.as_u16()),
            message,
        });
    }

    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_joined_with_a_single_slash() {
        let config = Config::default().with_api_url("http://localhost:8080/api/");
        let client = BackendClient::new(&config).unwrap();

        assert_eq!(client.url("generate-tests"), "http://localhost:8080/api/generate-tests");
        assert_eq!(client.url("/health"), "http://localhost:8080/api/health");
    }
}
