use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod audit;

pub use audit::{AuditData, AuditResponse};

/// Multipart field name carrying the image for both scan endpoints.
pub const IMAGE_FIELD: &str = "image";

pub const SCAN_ENVIRONMENT_PATH: &str = "/api/scan-environment/";
pub const PREDICT_PATH: &str = "/predict";
pub const SUBMIT_AUDIT_PATH: &str = "/api/submit-audit";

/// One entry of the `/api/scan-environment/` array response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskItem {
    pub label: String,
    pub confidence: f64,
    /// Detector-specific coordinates, echoed as JSON.
    #[serde(default)]
    pub location: Value,
}

/// Body of a `/predict` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PredictResponse {
    #[serde(default)]
    pub risks: Vec<PredictedRisk>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PredictedRisk {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub severity: String,
}

impl PredictedRisk {
    pub fn severity_level(&self) -> Severity {
        Severity::parse(&self.severity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Case-insensitive lookup accepting the English and French tier names.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "high" | "élevé" => Severity::High,
            "medium" | "moyen" => Severity::Medium,
            "low" | "faible" => Severity::Low,
            _ => Severity::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Unknown => "unknown",
        }
    }
}
