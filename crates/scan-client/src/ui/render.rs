use std::fmt::Write;

use flameo_protocol::{AuditData, AuditResponse, PredictResponse, PredictedRisk, RiskItem};
use serde_json::Value;

use super::text::{escape_text, json_text, number_text, value_text};
use super::theme::Theme;

pub const SCAN_RESULTS_HEADING: &str = "Résultats de l'analyse :";
pub const NO_RISK_TITLE: &str = "Aucun risque détecté";
const NO_RISK_BODY: &str = "L'image analysée ne présente aucun risque identifiable.";

/// Heading followed by one block per detected item.
pub fn render_scan_results(items: &[RiskItem]) -> String {
    let mut html = format!("<h2>{}</h2>\n", escape_text(SCAN_RESULTS_HEADING));
    for item in items {
        let _ = write!(
            html,
            "<div class=\"risk-item\">\n  \
             <p><strong>Label:</strong> {}</p>\n  \
             <p><strong>Confiance:</strong> {}</p>\n  \
             <p><strong>Emplacement:</strong> {}</p>\n\
             </div>\n",
            escape_text(&item.label),
            number_text(item.confidence),
            escape_text(&json_text(&item.location)),
        );
    }
    html
}

pub fn render_predict_results(theme: &Theme, response: &PredictResponse) -> String {
    if response.risks.is_empty() {
        return format!(
            "<div class=\"no-risk-card\">\n  <h3>{}</h3>\n  <p>{}</p>\n</div>\n",
            escape_text(NO_RISK_TITLE),
            escape_text(NO_RISK_BODY)
        );
    }
    let mut html = String::new();
    for risk in &response.risks {
        html.push_str(&risk_card(theme, risk));
    }
    html
}

fn risk_card(theme: &Theme, risk: &PredictedRisk) -> String {
    let level = risk.severity_level();
    format!(
        "<div class=\"risk-card\" data-severity=\"{}\">\n  \
         <div class=\"risk-header\">\n    \
         <h3>{}</h3>\n    \
         <span class=\"severity-badge\" style=\"background-color: {}\">{}</span>\n  \
         </div>\n  \
         <p>{}</p>\n\
         </div>\n",
        level.as_str(),
        escape_text(&risk.kind),
        theme.severity(level),
        escape_text(&risk.severity),
        escape_text(&risk.description),
    )
}

/// Verdict, echo of the submitted values, then the recommendations.
pub fn render_audit_result(theme: &Theme, response: &AuditResponse) -> String {
    let mut html = String::new();
    let _ = writeln!(
        html,
        "<h3 class=\"audit-status\" style=\"color: {}\">{}</h3>",
        theme.audit_status(&response.status),
        escape_text(&response.status)
    );
    let _ = writeln!(html, "<p class=\"audit-message\">{}</p>", escape_text(&response.message));
    html.push_str("<h4>Données de l'audit</h4>\n<ul class=\"audit-summary\">\n");
    for (label, value) in summary_rows(&response.data) {
        let _ = writeln!(
            html,
            "  <li><strong>{} :</strong> {}</li>",
            escape_text(label),
            escape_text(&value)
        );
    }
    html.push_str("</ul>\n<h4>Recommandations</h4>\n<ul class=\"recommendations\">\n");
    for recommendation in &response.recommendations {
        let _ = writeln!(html, "  <li>{}</li>", escape_text(recommendation));
    }
    html.push_str("</ul>\n");
    html
}

fn summary_rows(data: &AuditData) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Nom du bâtiment", data.building_name.clone()),
        ("Extincteurs", data.fire_extinguishers.to_string()),
        ("Sorties de secours", data.emergency_exits.to_string()),
        ("Détecteurs de fumée", data.smoke_detectors.to_string()),
        ("Superficie (m²)", data.building_size.to_string()),
        ("Nombre de pièces", data.room_count.to_string()),
        ("Tailles des pièces (m²)", data.room_sizes_text()),
    ];
    if let Some(kind) = &data.building_type {
        rows.push(("Type de bâtiment", kind.clone()));
    }
    if let Some(usage) = &data.building_usage {
        rows.push(("Usage", usage.clone()));
    }
    if let Some(drills) = &data.fire_drills {
        rows.push(("Exercices d'évacuation", value_text(drills)));
    }
    if let Some(materials) = &data.construction_materials {
        rows.push(("Matériaux de construction", value_text(materials)));
    }
    if let Some(plan) = &data.evacuation_plan {
        rows.push(("Plan d'évacuation", plan.clone()));
    }
    if let Some(sessions) = &data.training_sessions {
        rows.push(("Sessions de formation", sessions.to_string()));
    }
    if let Some(awareness) = &data.staff_awareness {
        rows.push(("Sensibilisation du personnel", awareness.to_string()));
    }
    if let Some(automated) = &data.automated_data {
        rows.push(("Données automatiques", json_text(&Value::Object(automated.clone()))));
    }
    rows
}
