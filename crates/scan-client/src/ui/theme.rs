use flameo_protocol::Severity;

/// Colors used by the rendered fragments.
pub struct Theme {
    high: &'static str,
    medium: &'static str,
    low: &'static str,
    neutral: &'static str,
    ok: &'static str,
    warn: &'static str,
    error: &'static str,
}

impl Theme {
    pub fn flameo() -> Self {
        Self {
            high: "#e74c3c",
            medium: "#f39c12",
            low: "#27ae60",
            neutral: "#95a5a6",
            ok: "#27ae60",
            warn: "#f39c12",
            error: "#e74c3c",
        }
    }

    pub fn severity(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unknown => self.neutral,
        }
    }

    pub fn neutral(&self) -> &'static str {
        self.neutral
    }

    /// Color of the audit verdict banner.
    pub fn audit_status(&self, status: &str) -> &'static str {
        match status.trim().to_lowercase().as_str() {
            "conforme" | "compliant" => self.ok,
            "non conforme" | "non-compliant" => self.error,
            "" => self.neutral,
            _ => self.warn,
        }
    }
}
