use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Field names posted by the audit form.
pub mod fields {
    pub const BUILDING_NAME: &str = "buildingName";
    pub const BUILDING_TYPE: &str = "buildingType";
    pub const BUILDING_USAGE: &str = "buildingUsage";
    pub const BUILDING_SIZE: &str = "buildingSize";
    pub const FIRE_EXTINGUISHERS: &str = "fireExtinguishers";
    pub const EMERGENCY_EXITS: &str = "emergencyExits";
    pub const SMOKE_DETECTORS: &str = "smokeDetectors";
    pub const FIRE_DRILLS: &str = "fireDrills";
    pub const ROOM_COUNT: &str = "roomCount";
    pub const ROOM_SIZES: &str = "roomSizes";
    pub const CONSTRUCTION_MATERIALS: &str = "constructionMaterials";
    pub const EVACUATION_PLAN: &str = "evacuationPlan";
    pub const TRAINING_SESSIONS: &str = "trainingSessions";
    pub const STAFF_AWARENESS: &str = "staffAwareness";

    pub const ALL: [&str; 14] = [
        BUILDING_NAME,
        BUILDING_TYPE,
        BUILDING_USAGE,
        BUILDING_SIZE,
        FIRE_EXTINGUISHERS,
        EMERGENCY_EXITS,
        SMOKE_DETECTORS,
        FIRE_DRILLS,
        ROOM_COUNT,
        ROOM_SIZES,
        CONSTRUCTION_MATERIALS,
        EVACUATION_PLAN,
        TRAINING_SESSIONS,
        STAFF_AWARENESS,
    ];
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditResponse {
    pub status: String,
    pub message: String,
    pub data: AuditData,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Submitted values echoed back by the audit endpoint.
///
/// Numbers are kept as [`Number`] so that they render exactly as the server
/// sent them (`3` stays `3`, `120.5` stays `120.5`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuditData {
    pub building_name: String,
    pub fire_extinguishers: Number,
    pub emergency_exits: Number,
    pub smoke_detectors: Number,
    pub building_size: Number,
    pub room_count: Number,
    #[serde(default)]
    pub room_sizes: Vec<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_usage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fire_drills: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construction_materials: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evacuation_plan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_sessions: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_awareness: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automated_data: Option<Map<String, Value>>,
}

impl AuditData {
    pub fn room_sizes_text(&self) -> String {
        self.room_sizes
            .iter()
            .map(Number::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_response() -> Value {
        json!({
            "status": "Non conforme",
            "message": "Nombre de sorties de secours insuffisant (minimum 2 requises).",
            "data": {
                "buildingName": "Entrepôt Nord",
                "fireExtinguishers": 3,
                "emergencyExits": 1,
                "smokeDetectors": 4,
                "buildingSize": 650.5,
                "roomCount": 4,
                "roomSizes": [20, 35.5, 60]
            },
            "recommendations": [
                "Ajoutez au moins deux sorties de secours accessibles et bien signalées."
            ]
        })
    }

    #[test]
    fn decodes_required_echo_fields() {
        let response: AuditResponse =
            serde_json::from_value(minimal_response()).expect("deserialize");
        assert_eq!(response.data.building_name, "Entrepôt Nord");
        assert_eq!(response.data.emergency_exits.to_string(), "1");
        assert_eq!(response.data.building_size.to_string(), "650.5");
        assert_eq!(response.data.room_sizes_text(), "20, 35.5, 60");
        assert!(response.data.building_type.is_none());
        assert_eq!(response.recommendations.len(), 1);
    }

    #[test]
    fn decodes_optional_echo_fields() {
        let mut raw = minimal_response();
        raw["data"]["buildingType"] = json!("ERP");
        raw["data"]["evacuationPlan"] = json!("non");
        raw["data"]["trainingSessions"] = json!(1);
        raw["data"]["automatedData"] = json!({"temperature": 25});
        let response: AuditResponse = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(response.data.building_type.as_deref(), Some("ERP"));
        assert_eq!(response.data.evacuation_plan.as_deref(), Some("non"));
        assert_eq!(
            response.data.training_sessions.map(|n| n.to_string()),
            Some("1".to_string())
        );
        let automated = response.data.automated_data.expect("automated data");
        assert_eq!(automated["temperature"], json!(25));
    }

    #[test]
    fn missing_recommendations_default_to_empty() {
        let mut raw = minimal_response();
        raw.as_object_mut()
            .expect("object")
            .remove("recommendations");
        let response: AuditResponse = serde_json::from_value(raw).expect("deserialize");
        assert!(response.recommendations.is_empty());
    }

    #[test]
    fn field_names_are_unique() {
        let mut names = fields::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), fields::ALL.len());
    }
}
