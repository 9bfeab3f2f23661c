use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{RequestForm, ResultSummary, TestCase, TestResult};

pub const POSTMAN_SCHEMA: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

const CSV_HEADERS: [&str; 5] = ["Test Name", "Status", "Duration (ms)", "Status Code", "Errors"];

/// Formatos de exportación disponibles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
    Postman,
    Clipboard,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Json,
        ExportFormat::Csv,
        ExportFormat::Postman,
        ExportFormat::Clipboard,
    ];

    /// Nombre del archivo de salida; el texto para el portapapeles no tiene archivo
    pub fn file_name(&self, epoch_millis: i64) -> Option<String> {
        match self {
            ExportFormat::Json => Some(format!("apibeast-results-{}.json", epoch_millis)),
            ExportFormat::Csv => Some(format!("apibeast-results-{}.csv", epoch_millis)),
            ExportFormat::Postman => Some(format!("apibeast-collection-{}.json", epoch_millis)),
            ExportFormat::Clipboard => None,
        }
    }

    /// Postman exporta las pruebas; el resto, los resultados
    pub fn needs_results(&self) -> bool {
        !matches!(self, ExportFormat::Postman)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::Postman => "postman",
            ExportFormat::Clipboard => "clipboard",
        };
        f.write_str(label)
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown export format '{}'", s))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    endpoint: &'a str,
    method: &'a str,
    timestamp: String,
    total_tests: usize,
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
}

/// Informe JSON con el resumen de la ejecución y todos los resultados
pub fn json_report(form: &RequestForm, results: &[TestResult], at: DateTime<Utc>) -> Result<String> {
    let summary = ResultSummary::from_results(results);
    let report = JsonReport {
        endpoint: &form.endpoint,
        method: form.method.as_str(),
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        total_tests: summary.total,
        passed: summary.passed,
        failed: summary.failed,
        results,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

/// Informe CSV: una fila por resultado, todas las celdas entre comillas
pub fn csv_report(results: &[TestResult]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;

    for result in results {
        let status_code = result
            .response_status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());

        writer.write_record([
            result.test_name.clone(),
            result.status.as_str().to_string(),
            result.duration_ms.to_string(),
            status_code,
            result.errors.join("; "),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Texto plano pensado para pegarlo en un chat o un ticket
pub fn clipboard_text(results: &[TestResult]) -> String {
    results
        .iter()
        .map(|r| {
            let mut line = format!(
                "{}: {} ({}ms)",
                r.test_name,
                r.status.as_str().to_uppercase(),
                r.duration_ms
            );
            if !r.errors.is_empty() {
                line.push_str("\n  Errors: ");
                line.push_str(&r.errors.join(", "));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Colección Postman v2.1 con una petición por caso de prueba.
///
/// Si el caso no trae URL o cabeceras propias se usan las del formulario.
pub fn postman_collection(form: &RequestForm, tests: &[TestCase]) -> Value {
    let form_headers: BTreeMap<String, String> =
        serde_json::from_str(&form.headers).unwrap_or_default();

    let items: Vec<Value> = tests
        .iter()
        .map(|test| postman_item(test, form, &form_headers))
        .collect();

    json!({
        "info": {
            "_postman_id": Uuid::new_v4().to_string(),
            "name": format!("APIBeast - {} {}", form.method, form.endpoint),
            "description": "Test cases generated by APIBeast",
            "schema": POSTMAN_SCHEMA,
        },
        "item": items,
    })
}

fn postman_item(test: &TestCase, form: &RequestForm, form_headers: &BTreeMap<String, String>) -> Value {
    let url = test.endpoint().unwrap_or(&form.endpoint);

    let headers = {
        let own = test.headers();
        if own.is_empty() {
            form_headers.clone()
        } else {
            own
        }
    };
    let header: Vec<Value> = headers
        .iter()
        .map(|(key, value)| json!({"key": key, "value": value, "type": "text"}))
        .collect();

    let mut request = json!({
        "method": test.method.to_uppercase(),
        "header": header,
        "url": {"raw": url},
        "description": test.description,
    });

    if let Some(body) = test.body() {
        let raw = match body {
            Value::String(s) => s.clone(),
            other => serde_json::to_string_pretty(other).unwrap_or_default(),
        };
        request["body"] = json!({
            "mode": "raw",
            "raw": raw,
            "options": {"raw": {"language": "json"}},
        });
    }

    json!({
        "name": test.name,
        "request": request,
        "event": [{
            "listen": "test",
            "script": {
                "type": "text/javascript",
                "exec": [
                    format!("pm.test(\"Status code is {}\", function () {{", test.expected_status),
                    format!("    pm.response.to.have.status({});", test.expected_status),
                    "});".to_string(),
                ],
            },
        }],
    })
}
