//! Integration tests for BackendClient and Session against a mocked backend.

use std::net::TcpListener;

use apibeast::models::{
    GenerateTestsRequest, HttpMethod, RequestForm, TestCase, TestResult, TestStatus,
};
use apibeast::{AppError, BackendClient, Config, Session};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BackendClient {
    let config = Config::default().with_api_url(format!("{}/api", server.uri()));
    BackendClient::new(&config).expect("failed to create client")
}

fn generated_tests() -> serde_json::Value {
    json!([
        {
            "id": "6a1f",
            "name": "Get all posts",
            "description": "Returns the list of posts",
            "method": "GET",
            "endpoint": "https://jsonplaceholder.typicode.com/posts",
            "headers": {},
            "body": null,
            "expected_status": 200,
            "assertions": []
        },
        {
            "id": "7b2e",
            "name": "Unknown route",
            "description": "Returns 404",
            "method": "GET",
            "endpoint": "https://jsonplaceholder.typicode.com/nope",
            "headers": {},
            "body": null,
            "expected_status": 404,
            "assertions": []
        }
    ])
}

fn test_cases() -> Vec<TestCase> {
    serde_json::from_value(generated_tests()).expect("fixture must parse")
}

fn previous_results() -> Vec<TestResult> {
    serde_json::from_value(json!([{
        "test_id": "old",
        "test_name": "Previous run",
        "status": "passed",
        "duration_ms": 42,
        "response_status": 200,
        "errors": []
    }]))
    .expect("fixture must parse")
}

#[tokio::test]
async fn test_generate_tests_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-tests"))
        .and(body_json(json!({
            "endpoint": "https://jsonplaceholder.typicode.com/posts",
            "method": "GET"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "tests": generated_tests()})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request = GenerateTestsRequest {
        endpoint: "https://jsonplaceholder.typicode.com/posts".to_string(),
        method: HttpMethod::Get,
        headers: None,
        body: None,
    };

    let tests = client.generate_tests(&request).await.expect("generate failed");

    assert_eq!(tests.len(), 2);
    assert_eq!(tests[0].name, "Get all posts");
    assert_eq!(tests[1].expected_status, 404);
    assert_eq!(tests[1].endpoint(), Some("https://jsonplaceholder.typicode.com/nope"));
}

#[tokio::test]
async fn test_generate_tests_unsuccessful_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let form = RequestForm::new("https://example.com", HttpMethod::Get);
    let err = client
        .generate_tests(&form.build_generate_request().unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Failed to generate tests");
}

#[tokio::test]
async fn test_generate_tests_server_error_surfaces_backend_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-tests"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "Gemini API returned error status 403"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let form = RequestForm::new("https://example.com", HttpMethod::Get);
    let err = client
        .generate_tests(&form.build_generate_request().unwrap())
        .await
        .unwrap_err();

    match err {
        AppError::Backend { status, message } => {
            assert_eq!(status, Some(500));
            assert_eq!(message, "Gemini API returned error status 403");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_body_uses_status_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/execute-tests"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tests = test_cases();
    let err = client.execute_tests(&tests).await.unwrap_err();

    assert_eq!(err.to_string(), "Request failed with status code 502");
}

#[tokio::test]
async fn test_execute_tests_sends_tests_back_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/execute-tests"))
        .and(body_json(json!({"tests": generated_tests()})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [
                {
                    "test_id": "6a1f",
                    "test_name": "Get all posts",
                    "status": "passed",
                    "duration_ms": 120,
                    "response_status": 200,
                    "response_body": [],
                    "errors": [],
                    "timestamp": "2024-05-01T12:00:00Z"
                },
                {
                    "test_id": "7b2e",
                    "test_name": "Unknown route",
                    "status": "failed",
                    "duration_ms": 80,
                    "response_status": 200,
                    "response_body": null,
                    "errors": ["Expected status 404, got 200"],
                    "timestamp": "2024-05-01T12:00:01Z"
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tests = test_cases();
    let results = client.execute_tests(&tests).await.expect("execute failed");

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].status, TestStatus::Passed);
    assert_eq!(results[1].status, TestStatus::Failed);
    assert_eq!(results[1].errors, vec!["Expected status 404, got 200".to_string()]);
}

#[tokio::test]
async fn test_execute_tests_fallback_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/execute-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false, "error": null})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let tests = test_cases();
    let err = client.execute_tests(&tests).await.unwrap_err();

    assert_eq!(err.to_string(), "Failed to execute tests");
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "APIBeast",
            "version": "0.1.0"
        })))
        .mount(&server)
        .await;

    let health = client_for(&server).health().await.expect("health failed");
    assert_eq!(health.status, "healthy");
    assert_eq!(health.service, "APIBeast");
}

#[tokio::test]
async fn test_transport_error_when_backend_is_down() {
    // Bind and release a port so nothing is listening on it
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind");
        listener.local_addr().unwrap().port()
    };
    let config = Config::default().with_api_url(format!("http://127.0.0.1:{}/api", port));
    let client = BackendClient::new(&config).expect("failed to create client");

    let form = RequestForm::new("https://example.com", HttpMethod::Get);
    let err = client
        .generate_tests(&form.build_generate_request().unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Transport(_)), "unexpected error: {err:?}");
    assert!(err.to_string().starts_with("Failed to connect to server:"));
}

#[tokio::test]
async fn test_session_generate_then_execute() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-tests"))
        .and(body_partial_json(json!({
            "method": "POST",
            "headers": {"Content-Type": "application/json"},
            "body": "{\"title\": \"foo\"}"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "tests": generated_tests()})),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/execute-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "results": [{
                "test_id": "6a1f",
                "test_name": "Get all posts",
                "status": "error",
                "duration_ms": 5,
                "response_status": null,
                "response_body": null,
                "errors": ["Request failed: connection refused"]
            }]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut form = RequestForm::new("https://example.com/posts", HttpMethod::Post);
    form.headers = r#"{"Content-Type": "application/json"}"#.to_string();
    form.body = r#"{"title": "foo"}"#.to_string();

    let mut session = Session::new(form);
    session.generate(&client).await.expect("generate failed");
    assert_eq!(session.tests.len(), 2);

    session.execute(&client).await.expect("execute failed");
    let summary = session.summary();
    assert_eq!(summary.total, 1);
    assert_eq!(summary.errored, 1);
    assert!(session.error.is_none());
}

#[tokio::test]
async fn test_session_records_backend_error_and_clears_tests() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-tests"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "success": false,
            "error": "quota exceeded"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = Session::new(RequestForm::new("https://example.com", HttpMethod::Get));
    session.tests = serde_json::from_value(generated_tests()).unwrap();

    assert!(session.generate(&client).await.is_err());
    assert!(session.tests.is_empty());
    assert_eq!(session.error.as_deref(), Some("quota exceeded"));
}

#[tokio::test]
async fn test_regenerating_discards_stale_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate-tests"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "tests": generated_tests()})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = Session::new(RequestForm::new("https://example.com", HttpMethod::Get));
    session.tests = test_cases();
    session.results = previous_results();

    session.generate(&client).await.expect("generate failed");

    assert_eq!(session.tests.len(), 2);
    assert!(session.results.is_empty());
}

#[tokio::test]
async fn test_failed_execution_clears_results_and_records_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/execute-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": "x"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut session = Session::new(RequestForm::new("https://example.com", HttpMethod::Get));
    session.tests = test_cases();
    session.results = previous_results();

    let err = session.execute(&client).await.unwrap_err();

    assert_eq!(err.to_string(), "x");
    assert!(session.results.is_empty());
    assert_eq!(session.tests.len(), 2);
    assert_eq!(session.error.as_deref(), Some("x"));
}
