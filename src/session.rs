use tracing::{info, warn};

use crate::client::BackendClient;
use crate::error::{AppError, Result};
use crate::models::{ApiTemplate, RequestForm, ResultSummary, SavedSuite, TestCase, TestResult};

/// Estado en memoria de una sesión de trabajo: el formulario, las pruebas
/// generadas, los resultados de la última ejecución y el último error.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub form: RequestForm,
    pub tests: Vec<TestCase>,
    pub results: Vec<TestResult>,
    pub error: Option<String>,
}

impl Session {
    pub fn new(form: RequestForm) -> Self {
        Self {
            form,
            ..Default::default()
        }
    }

    pub fn load_template(&mut self, template: &ApiTemplate) {
        self.form = RequestForm::from_template(template);
        self.error = None;
    }

    /// Restaura el formulario y las pruebas de una suite guardada
    pub fn load_suite(&mut self, suite: &SavedSuite) {
        self.form = suite.form();
        self.tests = suite.tests.clone();
        self.results.clear();
        self.error = None;
    }

    /// Genera pruebas para el formulario actual.
    ///
    /// Sin endpoint no se toca nada. En cualquier otro caso las pruebas y
    /// resultados anteriores se descartan antes de validar las cabeceras y
    /// llamar al backend; si algo falla, el mensaje queda en `error`.
    pub async fn generate(&mut self, client: &BackendClient) -> Result<&[TestCase]> {
        if self.form.endpoint.trim().is_empty() {
            return Err(self.record(AppError::validation("Please enter an API endpoint")));
        }

        self.error = None;
        self.tests.clear();
        self.results.clear();

        let request = match self.form.build_generate_request() {
            Ok(request) => request,
            Err(e) => return Err(self.record(e)),
        };

        match client.generate_tests(&request).await {
            Ok(tests) => {
                self.tests = tests;
                Ok(&self.tests)
            }
            Err(e) => Err(self.record(e)),
        }
    }

    /// Ejecuta las pruebas generadas. Sin pruebas no hace nada.
    pub async fn execute(&mut self, client: &BackendClient) -> Result<&[TestResult]> {
        if self.tests.is_empty() {
            info!("no tests to execute");
            return Ok(&self.results);
        }

        self.results.clear();

        match client.execute_tests(&self.tests).await {
            Ok(results) => {
                self.results = results;
                Ok(&self.results)
            }
            Err(e) => Err(self.record(e)),
        }
    }

    pub fn summary(&self) -> ResultSummary {
        ResultSummary::from_results(&self.results)
    }

    fn record(&mut self, error: AppError) -> AppError {
        warn!(%error, "session operation failed");
        self.error = Some(error.to_string());
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::HttpMethod;

    #[tokio::test]
    async fn invalid_form_is_reported_without_touching_tests() {
        // Puerto cerrado: la validación falla antes de cualquier petición
        let client = BackendClient::new(&Config::default().with_api_url("http://127.0.0.1:9")).unwrap();

        let mut session = Session::new(RequestForm::new("", HttpMethod::Get));
        let err = session.generate(&client).await.unwrap_err();

        assert_eq!(err.to_string(), "Please enter an API endpoint");
        assert_eq!(session.error.as_deref(), Some("Please enter an API endpoint"));
    }

    #[tokio::test]
    async fn empty_endpoint_keeps_previous_tests() {
        let client = BackendClient::new(&Config::default().with_api_url("http://127.0.0.1:9")).unwrap();

        let mut session = Session::new(RequestForm::new("  ", HttpMethod::Get));
        session.tests = vec![sample_test()];

        assert!(session.generate(&client).await.is_err());
        assert_eq!(session.tests.len(), 1);
    }

    #[tokio::test]
    async fn invalid_headers_discard_previous_tests_and_results() {
        let client = BackendClient::new(&Config::default().with_api_url("http://127.0.0.1:9")).unwrap();

        let mut session = Session::new(RequestForm::new("https://example.com", HttpMethod::Get));
        session.form.headers = "{bad".to_string();
        session.tests = vec![sample_test()];
        session.results = vec![sample_result()];

        let err = session.generate(&client).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid JSON in headers");
        assert!(session.tests.is_empty());
        assert!(session.results.is_empty());
        assert_eq!(session.error.as_deref(), Some("Invalid JSON in headers"));
    }

    fn sample_test() -> TestCase {
        serde_json::from_value(serde_json::json!({
            "id": "old",
            "name": "Previous request",
            "method": "GET",
            "expected_status": 200
        }))
        .unwrap()
    }

    fn sample_result() -> TestResult {
        serde_json::from_value(serde_json::json!({
            "test_id": "old",
            "test_name": "Previous request",
            "status": "passed",
            "duration_ms": 10
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn executing_without_tests_is_a_no_op() {
        let client = BackendClient::new(&Config::default().with_api_url("http://127.0.0.1:9")).unwrap();

        let mut session = Session::default();
        let results = session.execute(&client).await.unwrap();

        assert!(results.is_empty());
        assert!(session.error.is_none());
    }
}
