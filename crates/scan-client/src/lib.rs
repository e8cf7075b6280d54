//! Client side of the Flaméo fire-safety tools: image scans, risk
//! predictions and building audits submitted to the backend and rendered
//! into a page.

pub mod backend;
pub mod config;
pub mod controller;
mod decor;
pub mod error;
pub mod http;
pub mod logging;
pub mod page;
pub mod progress;
pub mod ui;

pub use backend::ScanBackend;
pub use config::{load_client_config, resolve_client_config, ClientConfig};
pub use controller::{UploadController, UsageSection};
pub use error::ClientError;
pub use http::HttpBackend;
pub use page::{MemoryPage, Page, Panel, Region, SelectedFile};
