use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use super::{FormFields, Page, Panel, Particle, Region, SelectedFile, StatusTone, Toast};

const DEFAULT_SUBMIT_LABEL: &str = "Analyser l'image";

/// Snapshot of everything a [`MemoryPage`] has been told to display.
#[derive(Debug, Clone)]
pub struct PageState {
    pub selection: Option<SelectedFile>,
    pub drop_zone_active: bool,
    pub file_status: Option<(String, StatusTone)>,
    pub regions: HashMap<Region, String>,
    pub region_writes: HashMap<Region, usize>,
    pub visible: HashMap<Panel, bool>,
    pub progress: f64,
    pub progress_history: Vec<f64>,
    pub submit_enabled: bool,
    pub submit_label: String,
    pub usage: String,
    pub audit_fields: FormFields,
    pub alerts: Vec<String>,
    pub toasts: Vec<Toast>,
    pub toast_history: Vec<Toast>,
    pub particles: Vec<Particle>,
    pub lifted_cards: BTreeSet<usize>,
}

impl Default for PageState {
    fn default() -> Self {
        let visible = HashMap::from([
            (Panel::AuditResult, false),
            (Panel::PersonalSection, true),
            (Panel::ProfessionalSection, true),
            (Panel::ProgressBar, false),
        ]);
        Self {
            selection: None,
            drop_zone_active: false,
            file_status: None,
            regions: HashMap::new(),
            region_writes: HashMap::new(),
            visible,
            progress: 0.0,
            progress_history: Vec::new(),
            submit_enabled: true,
            submit_label: DEFAULT_SUBMIT_LABEL.to_string(),
            usage: String::new(),
            audit_fields: Vec::new(),
            alerts: Vec::new(),
            toasts: Vec::new(),
            toast_history: Vec::new(),
            particles: Vec::new(),
            lifted_cards: BTreeSet::new(),
        }
    }
}

impl PageState {
    pub fn region(&self, region: Region) -> &str {
        self.regions.get(&region).map(String::as_str).unwrap_or("")
    }

    pub fn writes(&self, region: Region) -> usize {
        self.region_writes.get(&region).copied().unwrap_or(0)
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.get(&panel).copied().unwrap_or(false)
    }
}

/// In-memory document used headlessly and as a test double.
#[derive(Debug, Default)]
pub struct MemoryPage {
    state: Mutex<PageState>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_usage(self, usage: impl Into<String>) -> Self {
        self.set_usage(usage);
        self
    }

    pub fn with_submit_label(self, label: impl Into<String>) -> Self {
        self.lock().submit_label = label.into();
        self
    }

    pub fn with_audit_fields(self, fields: FormFields) -> Self {
        self.lock().audit_fields = fields;
        self
    }

    pub fn with_region_html(self, region: Region, html: impl Into<String>) -> Self {
        self.lock().regions.insert(region, html.into());
        self
    }

    /// Changes the usage selector without notifying anyone, like a user
    /// picking a new option.
    pub fn set_usage(&self, usage: impl Into<String>) {
        self.lock().usage = usage.into();
    }

    pub fn state(&self) -> PageState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Page for MemoryPage {
    fn selected_file(&self) -> Option<SelectedFile> {
        self.lock().selection.clone()
    }

    fn set_selected_file(&self, file: SelectedFile) {
        self.lock().selection = Some(file);
    }

    fn set_drop_zone_active(&self, active: bool) {
        self.lock().drop_zone_active = active;
    }

    fn set_file_status(&self, text: &str, tone: StatusTone) {
        self.lock().file_status = Some((text.to_string(), tone));
    }

    fn set_region_html(&self, region: Region, html: String) {
        let mut state = self.lock();
        state.regions.insert(region, html);
        *state.region_writes.entry(region).or_insert(0) += 1;
    }

    fn set_panel_visible(&self, panel: Panel, visible: bool) {
        self.lock().visible.insert(panel, visible);
    }

    fn set_progress(&self, percent: f64) {
        let mut state = self.lock();
        state.progress = percent;
        state.progress_history.push(percent);
    }

    fn submit_label(&self) -> String {
        self.lock().submit_label.clone()
    }

    fn set_submit_state(&self, enabled: bool, label: &str) {
        let mut state = self.lock();
        state.submit_enabled = enabled;
        state.submit_label = label.to_string();
    }

    fn usage_value(&self) -> String {
        self.lock().usage.clone()
    }

    fn audit_form(&self) -> FormFields {
        self.lock().audit_fields.clone()
    }

    fn alert(&self, message: &str) {
        self.lock().alerts.push(message.to_string());
    }

    fn show_toast(&self, toast: &Toast) {
        let mut state = self.lock();
        state.toasts.push(toast.clone());
        state.toast_history.push(toast.clone());
    }

    fn dismiss_toast(&self, id: Uuid) {
        self.lock().toasts.retain(|toast| toast.id != id);
    }

    fn add_particle(&self, particle: Particle) {
        self.lock().particles.push(particle);
    }

    fn set_card_lifted(&self, index: usize, lifted: bool) {
        let mut state = self.lock();
        if lifted {
            state.lifted_cards.insert(index);
        } else {
            state.lifted_cards.remove(&index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::ToastKind;

    #[test]
    fn fresh_page_hides_result_panel_and_progress() {
        let state = MemoryPage::new().state();
        assert!(!state.is_visible(Panel::AuditResult));
        assert!(!state.is_visible(Panel::ProgressBar));
        assert!(state.submit_enabled);
        assert_eq!(state.submit_label, DEFAULT_SUBMIT_LABEL);
        assert_eq!(state.region(Region::ScanResults), "");
    }

    #[test]
    fn counts_region_writes() {
        let page = MemoryPage::new();
        page.set_region_html(Region::ScanResults, "<p>a</p>".to_string());
        page.set_region_html(Region::ScanResults, "<p>b</p>".to_string());
        let state = page.state();
        assert_eq!(state.writes(Region::ScanResults), 2);
        assert_eq!(state.writes(Region::PredictResults), 0);
        assert_eq!(state.region(Region::ScanResults), "<p>b</p>");
    }

    #[test]
    fn dismiss_only_removes_matching_toast() {
        let page = MemoryPage::new();
        let first = Toast {
            id: Uuid::new_v4(),
            message: "un".to_string(),
            kind: ToastKind::Info,
        };
        let second = Toast {
            id: Uuid::new_v4(),
            message: "deux".to_string(),
            kind: ToastKind::Error,
        };
        page.show_toast(&first);
        page.show_toast(&second);
        page.dismiss_toast(first.id);
        let state = page.state();
        assert_eq!(state.toasts, vec![second]);
        assert_eq!(state.toast_history.len(), 2);
    }

    #[test]
    fn card_lift_toggles() {
        let page = MemoryPage::new();
        page.set_card_lifted(2, true);
        page.set_card_lifted(4, true);
        page.set_card_lifted(2, false);
        assert_eq!(page.state().lifted_cards, BTreeSet::from([4]));
    }
}
