use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::TestStatus;

/// Resultado de un caso de prueba ejecutado por el backend
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TestResult {
    pub test_id: String,
    pub test_name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    #[serde(default)]
    pub response_status: Option<u16>,
    #[serde(default)]
    pub response_body: Option<Value>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Conteo de resultados por estado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
}

impl ResultSummary {
    pub fn from_results(results: &[TestResult]) -> Self {
        let count = |status: TestStatus| results.iter().filter(|r| r.status == status).count();

        Self {
            total: results.len(),
            passed: count(TestStatus::Passed),
            failed: count(TestStatus::Failed),
            errored: count(TestStatus::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn optional_fields_may_be_missing() {
        let result: TestResult = serde_json::from_value(json!({
            "test_id": "a",
            "test_name": "Get user",
            "status": "error",
            "duration_ms": 12
        }))
        .unwrap();

        assert_eq!(result.status, TestStatus::Error);
        assert!(result.response_status.is_none());
        assert!(result.errors.is_empty());
        assert!(result.timestamp.is_none());
    }

    #[test]
    fn summary_counts_each_status() {
        let make = |status| TestResult {
            test_id: "x".into(),
            test_name: "x".into(),
            status,
            duration_ms: 1,
            response_status: None,
            response_body: None,
            errors: vec![],
            timestamp: None,
        };
        let results = vec![
            make(TestStatus::Passed),
            make(TestStatus::Passed),
            make(TestStatus::Failed),
            make(TestStatus::Error),
        ];

        let summary = ResultSummary::from_results(&results);
        assert_eq!(
            summary,
            ResultSummary {
                total: 4,
                passed: 2,
                failed: 1,
                errored: 1
            }
        );
    }
}
