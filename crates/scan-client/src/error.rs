use thiserror::Error;

/// Every way a submission can fail.
///
/// The controller treats all variants alike: log, notify, restore controls.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {status} from {endpoint}")]
    Status { endpoint: String, status: u16 },
    #[error("malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        ClientError::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// Short machine-readable code, stable across message wording changes.
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::NoFileSelected => "no_file",
            ClientError::InvalidUrl(_) => "invalid_url",
            ClientError::Transport(_) => "transport",
            ClientError::Status { .. } => "status",
            ClientError::Decode { .. } => "decode",
            ClientError::Io(_) => "io",
        }
    }
}
