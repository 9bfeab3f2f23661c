use serde::{Deserialize, Serialize};
use std::fmt;

/// Resultado de la ejecución de un caso de prueba, tal como lo informa el backend
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Error,
}

impl TestStatus {
    /// Nombre en minúsculas, igual que en el JSON del backend
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Error => "error",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Passed => write!(f, "✅ Passed"),
            TestStatus::Failed => write!(f, "❌ Failed"),
            TestStatus::Error => write!(f, "⚠️ Error"),
        }
    }
}
