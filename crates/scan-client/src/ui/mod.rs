pub(crate) mod render;
pub(crate) mod text;
pub(crate) mod theme;

pub use render::{
    render_audit_result, render_predict_results, render_scan_results, NO_RISK_TITLE,
    SCAN_RESULTS_HEADING,
};
pub use theme::Theme;
