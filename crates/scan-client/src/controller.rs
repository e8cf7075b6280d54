//! Wires page events to backend submissions and renders the responses.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info, warn};

use crate::backend::ScanBackend;
use crate::config::{ClientConfig, DecorConfig, ProgressConfig};
use crate::decor;
use crate::error::ClientError;
use crate::page::{Page, Panel, Region, SelectedFile, StatusTone, ToastKind};
use crate::progress::{ProgressEstimator, ProgressTicker, RandomProgress};
use crate::ui::{render_audit_result, render_predict_results, render_scan_results, Theme};

pub const USAGE_PERSONAL: &str = "personnel";
pub const USAGE_PROFESSIONAL: &str = "professionnel";

pub const NO_FILE_LABEL: &str = "Aucun fichier sélectionné";
pub const LOADING_LABEL: &str = "⏳ Analyse en cours...";
pub const SCAN_FAILED_ALERT: &str = "Une erreur est survenue lors de l'analyse de l'image.";
pub const PREDICT_FAILED_ALERT: &str = "Erreur lors de l'analyse de l'image. Veuillez réessayer.";
pub const AUDIT_FAILED_ALERT: &str = "Une erreur est survenue lors de l'envoi de l'audit.";
const PREDICT_FAILED_TOAST: &str = "Échec de l'analyse";
const PREDICT_DONE_TOAST: &str = "Analyse terminée";

/// Which conditional form section the usage selector leaves visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageSection {
    Personal,
    Professional,
    Neither,
}

impl UsageSection {
    pub fn from_usage(value: &str) -> Self {
        match value {
            USAGE_PERSONAL => UsageSection::Personal,
            USAGE_PROFESSIONAL => UsageSection::Professional,
            _ => UsageSection::Neither,
        }
    }
}

type EstimatorFactory = Box<dyn Fn() -> Box<dyn ProgressEstimator> + Send + Sync>;

pub struct UploadController {
    page: Arc<dyn Page>,
    backend: Arc<dyn ScanBackend>,
    estimators: EstimatorFactory,
    theme: Theme,
    progress: ProgressConfig,
    decor: DecorConfig,
}

/// Re-enables the submit control with its original label on every exit path.
struct SubmitGuard {
    page: Arc<dyn Page>,
    label: String,
}

impl SubmitGuard {
    fn engage(page: Arc<dyn Page>) -> Self {
        let label = page.submit_label();
        page.set_submit_state(false, LOADING_LABEL);
        Self { page, label }
    }
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.page.set_submit_state(true, &self.label);
    }
}

impl UploadController {
    pub fn new(page: Arc<dyn Page>, backend: Arc<dyn ScanBackend>, config: &ClientConfig) -> Self {
        let max_increment = config.progress.max_increment;
        Self {
            page,
            backend,
            estimators: Box::new(move || -> Box<dyn ProgressEstimator> {
                Box::new(RandomProgress::new(max_increment))
            }),
            theme: Theme::flameo(),
            progress: config.progress.clone(),
            decor: config.decor.clone(),
        }
    }

    /// Replaces the source of progress increments, one estimator per request.
    pub fn with_estimator<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<dyn ProgressEstimator> + Send + Sync + 'static,
    {
        self.estimators = Box::new(factory);
        self
    }

    /// Page load: section visibility, the empty file label and the particle
    /// backdrop.
    pub fn init(&self) {
        self.toggle_usage_sections();
        if self.page.selected_file().is_none() {
            self.page.set_file_status(NO_FILE_LABEL, StatusTone::Neutral);
        }
        let mut rng = SmallRng::from_entropy();
        decor::spawn_particles(self.page.as_ref(), self.decor.particle_count, &mut rng);
    }

    pub fn drag_enter(&self) {
        self.page.set_drop_zone_active(true);
    }

    pub fn drag_over(&self) {
        self.page.set_drop_zone_active(true);
    }

    pub fn drag_leave(&self) {
        self.page.set_drop_zone_active(false);
    }

    /// Only the first dropped file is kept; an empty drop changes nothing
    /// but the drop zone marker.
    pub fn drop_files(&self, files: Vec<SelectedFile>) {
        self.page.set_drop_zone_active(false);
        match files.into_iter().next() {
            Some(file) => self.choose_file(file),
            None => info!("drop without files ignored"),
        }
    }

    pub fn choose_file(&self, file: SelectedFile) {
        info!(file = %file.name, bytes = file.len(), "file selected");
        self.page.set_file_status(&file.name, StatusTone::Success);
        self.page.set_selected_file(file);
    }

    /// Posts the selected image to the scan endpoint and lists the detections.
    ///
    /// On failure the results region is left as it was and the error is
    /// returned after the user has been alerted.
    pub async fn submit_scan(&self) -> Result<(), ClientError> {
        let result = match self.page.selected_file() {
            Some(file) => self.backend.scan_environment(&file).await,
            None => Err(ClientError::NoFileSelected),
        };
        match result {
            Ok(items) => {
                info!(items = items.len(), "scan results rendered");
                self.page
                    .set_region_html(Region::ScanResults, render_scan_results(&items));
                Ok(())
            }
            Err(err) => {
                error!(code = err.code(), error = %err, "scan failed");
                self.page.alert(SCAN_FAILED_ALERT);
                Err(err)
            }
        }
    }

    /// `/predict` flow with the busy button and the simulated progress bar.
    pub async fn submit_predict(&self) -> Result<(), ClientError> {
        let Some(file) = self.page.selected_file() else {
            return Err(self.fail_predict(ClientError::NoFileSelected));
        };
        let _guard = SubmitGuard::engage(Arc::clone(&self.page));
        let ticker = ProgressTicker::start(
            Arc::clone(&self.page),
            (self.estimators)(),
            &self.progress,
        );

        let result = self.backend.predict(&file).await;
        ticker.stop().await;

        match result {
            Ok(response) => {
                self.page.set_progress(100.0);
                self.hide_progress_later();
                info!(risks = response.risks.len(), "predict results rendered");
                self.page.set_region_html(
                    Region::PredictResults,
                    render_predict_results(&self.theme, &response),
                );
                self.notify(PREDICT_DONE_TOAST, ToastKind::Success);
                Ok(())
            }
            Err(err) => {
                self.page.set_panel_visible(Panel::ProgressBar, false);
                Err(self.fail_predict(err))
            }
        }
    }

    fn fail_predict(&self, err: ClientError) -> ClientError {
        error!(code = err.code(), error = %err, "predict failed");
        self.notify(PREDICT_FAILED_TOAST, ToastKind::Error);
        self.page.alert(PREDICT_FAILED_ALERT);
        err
    }

    fn hide_progress_later(&self) {
        let page = Arc::clone(&self.page);
        let delay = self.progress.hide_delay();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            page.set_panel_visible(Panel::ProgressBar, false);
        });
    }

    /// Posts every audit form field and reveals the summary panel.
    pub async fn submit_audit(&self) -> Result<(), ClientError> {
        let fields = self.page.audit_form();
        match self.backend.submit_audit(&fields).await {
            Ok(response) => {
                info!(
                    status = %response.status,
                    recommendations = response.recommendations.len(),
                    "audit result rendered"
                );
                self.page.set_region_html(
                    Region::AuditResult,
                    render_audit_result(&self.theme, &response),
                );
                self.page.set_panel_visible(Panel::AuditResult, true);
                Ok(())
            }
            Err(err) => {
                error!(code = err.code(), error = %err, "audit submission failed");
                self.page.alert(AUDIT_FAILED_ALERT);
                Err(err)
            }
        }
    }

    /// Shows the form section matching the usage selector. Not bound to the
    /// selector's change events; callers re-invoke it explicitly.
    pub fn toggle_usage_sections(&self) -> UsageSection {
        let usage = self.page.usage_value();
        let section = UsageSection::from_usage(&usage);
        if section == UsageSection::Neither && !usage.is_empty() {
            warn!(%usage, "unrecognized building usage");
        }
        self.page
            .set_panel_visible(Panel::PersonalSection, section == UsageSection::Personal);
        self.page.set_panel_visible(
            Panel::ProfessionalSection,
            section == UsageSection::Professional,
        );
        section
    }

    pub fn notify(&self, message: &str, kind: ToastKind) {
        decor::show_toast(
            Arc::clone(&self.page),
            message,
            kind,
            self.decor.toast_delay(),
        );
    }

    pub fn card_hover(&self, index: usize, hovered: bool) {
        self.page.set_card_lifted(index, hovered);
    }
}
