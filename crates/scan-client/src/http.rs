use async_trait::async_trait;
use flameo_protocol::{AuditResponse, PredictResponse, RiskItem, IMAGE_FIELD};
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::backend::ScanBackend;
use crate::config::{ClientConfig, EndpointConfig};
use crate::error::ClientError;
use crate::page::{FormFields, SelectedFile};

pub fn join_base_path(base: &str, path: &str) -> Result<String, ClientError> {
    if base.trim().is_empty() {
        return Err(ClientError::InvalidUrl("base_url is empty".to_string()));
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}

/// reqwest-backed [`ScanBackend`] talking to one origin.
pub struct HttpBackend {
    client: Client,
    base_url: String,
    endpoints: EndpointConfig,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        join_base_path(&config.base_url, &config.endpoints.scan)?;
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            endpoints: config.endpoints.clone(),
        })
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<reqwest::Response, ClientError> {
        let url = join_base_path(&self.base_url, path)?;
        debug!(%url, "posting multipart form");
        let response = self.client.post(&url).multipart(form).send().await?;
        info!(endpoint = path, status = response.status().as_u16(), "response received");
        Ok(response)
    }
}

fn image_form(file: &SelectedFile) -> Result<Form, ClientError> {
    let mut part = Part::bytes(file.data.to_vec()).file_name(file.name.clone());
    if let Some(mime) = file.mime.as_deref() {
        part = part.mime_str(mime)?;
    }
    Ok(Form::new().part(IMAGE_FIELD, part))
}

fn fields_form(fields: &FormFields) -> Form {
    fields
        .iter()
        .fold(Form::new(), |form, (name, value)| {
            form.text(name.clone(), value.clone())
        })
}

async fn decode_body<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| ClientError::decode(endpoint, err))
}

#[async_trait]
impl ScanBackend for HttpBackend {
    async fn scan_environment(&self, file: &SelectedFile) -> Result<Vec<RiskItem>, ClientError> {
        let path = self.endpoints.scan.as_str();
        info!(endpoint = path, file = %file.name, bytes = file.len(), "scan submit");
        let response = self.post_form(path, image_form(file)?).await?;
        decode_body(path, response).await
    }

    async fn predict(&self, file: &SelectedFile) -> Result<PredictResponse, ClientError> {
        let path = self.endpoints.predict.as_str();
        info!(endpoint = path, file = %file.name, bytes = file.len(), "predict submit");
        let response = self.post_form(path, image_form(file)?).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        decode_body(path, response).await
    }

    async fn submit_audit(&self, fields: &FormFields) -> Result<AuditResponse, ClientError> {
        let path = self.endpoints.audit.as_str();
        info!(endpoint = path, fields = fields.len(), "audit submit");
        let response = self.post_form(path, fields_form(fields)).await?;
        decode_body(path, response).await
    }
}
