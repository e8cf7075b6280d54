use anyhow::Context;
use flameo_protocol::{PREDICT_PATH, SCAN_ENVIRONMENT_PATH, SUBMIT_AUDIT_PATH};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub endpoints: EndpointConfig,
    pub progress: ProgressConfig,
    pub decor: DecorConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub scan: String,
    pub predict: String,
    pub audit: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    pub tick_ms: u64,
    /// Percentage the simulated progress never passes before the response.
    pub ceiling: f64,
    pub max_increment: f64,
    pub hide_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DecorConfig {
    pub particle_count: usize,
    pub toast_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// File name prefix inside the log directory; rotation appends the date.
    pub file_prefix: String,
    /// `EnvFilter` directives used when `RUST_LOG` is unset.
    pub filter: String,
    pub to_stderr: bool,
    pub rotation: LogRotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    Daily,
    Never,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            endpoints: EndpointConfig::default(),
            progress: ProgressConfig::default(),
            decor: DecorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            scan: SCAN_ENVIRONMENT_PATH.to_string(),
            predict: PREDICT_PATH.to_string(),
            audit: SUBMIT_AUDIT_PATH.to_string(),
        }
    }
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            ceiling: 90.0,
            max_increment: 10.0,
            hide_delay_ms: 500,
        }
    }
}

impl Default for DecorConfig {
    fn default() -> Self {
        Self {
            particle_count: 50,
            toast_ms: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_prefix: "client.log".to_string(),
            filter: "info".to_string(),
            to_stderr: false,
            rotation: LogRotation::Daily,
        }
    }
}

impl ProgressConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(1))
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

impl DecorConfig {
    pub fn toast_delay(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

fn validate_client_config(config: &ClientConfig) -> anyhow::Result<()> {
    if config.base_url.trim().is_empty() {
        anyhow::bail!("base_url must not be empty");
    }
    let ceiling = config.progress.ceiling;
    if !(ceiling > 0.0 && ceiling <= 100.0) {
        anyhow::bail!("progress.ceiling must be within (0, 100], got {ceiling}");
    }
    if config.progress.max_increment < 0.0 {
        anyhow::bail!("progress.max_increment must not be negative");
    }
    for (name, path) in [
        ("scan", &config.endpoints.scan),
        ("predict", &config.endpoints.predict),
        ("audit", &config.endpoints.audit),
    ] {
        if path.trim().is_empty() {
            anyhow::bail!("endpoints.{name} must not be empty");
        }
    }
    if config.logging.file_prefix.trim().is_empty() {
        anyhow::bail!("logging.file_prefix must not be empty");
    }
    EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid logging.filter {:?}", config.logging.filter))?;
    Ok(())
}

pub fn load_client_config(path: &Path) -> anyhow::Result<ClientConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: ClientConfig = toml::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    validate_client_config(&config)?;
    Ok(config)
}

/// Loads `path` when given, otherwise falls back to the built-in defaults.
pub fn resolve_client_config(
    path: Option<&Path>,
    base_url: Option<&str>,
) -> anyhow::Result<ClientConfig> {
    let mut config = match path {
        Some(path) => load_client_config(path)?,
        None => ClientConfig::default(),
    };
    if let Some(base_url) = base_url {
        config.base_url = base_url.to_string();
    }
    validate_client_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let parsed: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.base_url, DEFAULT_BASE_URL);
        assert_eq!(parsed.endpoints.scan, "/api/scan-environment/");
        assert_eq!(parsed.endpoints.predict, "/predict");
        assert_eq!(parsed.endpoints.audit, "/api/submit-audit");
        assert_eq!(parsed.progress.tick(), Duration::from_millis(200));
        assert_eq!(parsed.progress.ceiling, 90.0);
        assert_eq!(parsed.decor.particle_count, 50);
        assert!(validate_client_config(&parsed).is_ok());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let input = r#"
base_url = "http://audit.local"

[progress]
hide_delay_ms = 0
"#;
        let parsed: ClientConfig = toml::from_str(input).unwrap();
        assert_eq!(parsed.base_url, "http://audit.local");
        assert_eq!(parsed.progress.hide_delay(), Duration::ZERO);
        assert_eq!(parsed.progress.max_increment, 10.0);
        assert_eq!(parsed.decor.toast_delay(), Duration::from_secs(3));
    }

    #[test]
    fn rejects_empty_base_url() {
        let parsed: ClientConfig = toml::from_str("base_url = \"  \"").unwrap();
        assert!(validate_client_config(&parsed).is_err());
    }

    #[test]
    fn rejects_ceiling_out_of_range() {
        let parsed: ClientConfig = toml::from_str("[progress]\nceiling = 120.0").unwrap();
        assert!(validate_client_config(&parsed).is_err());
        let parsed: ClientConfig = toml::from_str("[progress]\nceiling = 0.0").unwrap();
        assert!(validate_client_config(&parsed).is_err());
    }

    #[test]
    fn logging_section_overrides_defaults() {
        let parsed: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(parsed.logging.file_prefix, "client.log");
        assert_eq!(parsed.logging.filter, "info");
        assert_eq!(parsed.logging.rotation, LogRotation::Daily);
        assert!(!parsed.logging.to_stderr);

        let input = r#"
[logging]
file_prefix = "flameo.log"
filter = "flameo_client=debug,warn"
to_stderr = true
rotation = "hourly"
"#;
        let parsed: ClientConfig = toml::from_str(input).unwrap();
        assert_eq!(parsed.logging.file_prefix, "flameo.log");
        assert_eq!(parsed.logging.rotation, LogRotation::Hourly);
        assert!(parsed.logging.to_stderr);
        assert!(validate_client_config(&parsed).is_ok());
    }

    #[test]
    fn rejects_bad_logging_section() {
        let parsed: ClientConfig = toml::from_str("[logging]\nfile_prefix = \"\"").unwrap();
        assert!(validate_client_config(&parsed).is_err());
        let parsed: ClientConfig = toml::from_str("[logging]\nfilter = \"flameo_client=verbose\"").unwrap();
        let err = validate_client_config(&parsed).unwrap_err();
        assert!(err.to_string().contains("invalid logging.filter"), "{err}");
        assert!(toml::from_str::<ClientConfig>("[logging]\nrotation = \"weekly\"").is_err());
    }

    #[test]
    fn base_url_override_wins() {
        let config = resolve_client_config(None, Some("http://10.0.0.2:9000")).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9000");
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = resolve_client_config(Some(Path::new("/nonexistent/flameo.toml")), None)
            .unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
