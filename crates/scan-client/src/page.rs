//! Handles onto the document the controller reads and mutates.

mod memory;

pub use memory::{MemoryPage, PageState};

use bytes::Bytes;
use std::path::Path;
use uuid::Uuid;

use crate::error::ClientError;

/// A file picked from the file input or dropped onto the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: Option<String>,
    pub data: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let name = name.into();
        let mime = guess_image_mime(&name).map(str::to_string);
        Self {
            name,
            mime,
            data: data.into(),
        }
    }

    pub async fn read(path: &Path) -> Result<Self, ClientError> {
        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, data))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn guess_image_mime(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Success,
}

/// Containers whose inner HTML gets replaced by a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    ScanResults,
    PredictResults,
    AuditResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    AuditResult,
    PersonalSection,
    ProfessionalSection,
    ProgressBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub left_pct: f64,
    pub size_px: f64,
    pub delay_secs: f64,
    pub duration_secs: f64,
}

/// Form fields in document order, as native form serialization yields them.
pub type FormFields = Vec<(String, String)>;

/// The document elements the upload controller is wired to.
///
/// Implementations are expected to apply mutations immediately; the
/// controller never batches.
pub trait Page: Send + Sync {
    fn selected_file(&self) -> Option<SelectedFile>;
    fn set_selected_file(&self, file: SelectedFile);
    fn set_drop_zone_active(&self, active: bool);
    fn set_file_status(&self, text: &str, tone: StatusTone);

    fn set_region_html(&self, region: Region, html: String);
    fn set_panel_visible(&self, panel: Panel, visible: bool);
    fn set_progress(&self, percent: f64);

    fn submit_label(&self) -> String;
    fn set_submit_state(&self, enabled: bool, label: &str);

    fn usage_value(&self) -> String;
    fn audit_form(&self) -> FormFields;

    /// Blocking notice; the user must acknowledge it.
    fn alert(&self, message: &str);
    fn show_toast(&self, toast: &Toast);
    fn dismiss_toast(&self, id: Uuid);

    fn add_particle(&self, particle: Particle);
    fn set_card_lifted(&self, index: usize, lifted: bool);
}
