use async_trait::async_trait;
use flameo_protocol::{AuditResponse, PredictResponse, RiskItem};

use crate::error::ClientError;
use crate::page::{FormFields, SelectedFile};

/// The three endpoints the pipeline talks to.
///
/// Each call is a single request; implementations must not retry.
#[async_trait]
pub trait ScanBackend: Send + Sync {
    async fn scan_environment(&self, file: &SelectedFile) -> Result<Vec<RiskItem>, ClientError>;
    async fn predict(&self, file: &SelectedFile) -> Result<PredictResponse, ClientError>;
    async fn submit_audit(&self, fields: &FormFields) -> Result<AuditResponse, ClientError>;
}
