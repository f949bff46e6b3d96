use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique detector identifier.
pub type DetectorUuid = Uuid;

/// Persisted detector configuration as served by the model store.
///
/// The core treats `detector_config` as an opaque map: only the matching
/// factory provider knows how to parse it into typed parameters. Round-trip
/// guarantee: parse → validate → the built detector behaves identically to
/// a freshly-constructed one with the same parameters and zero observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorDocument {
    pub uuid: DetectorUuid,
    #[serde(rename = "type")]
    pub detector_type: String,
    pub detector_config: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl DetectorDocument {
    pub fn new(uuid: DetectorUuid, detector_type: impl Into<String>, config: serde_json::Value) -> Self {
        Self {
            uuid,
            detector_type: detector_type.into(),
            detector_config: config,
            last_updated: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_store_json_shape() {
        let json = r#"{
            "uuid": "2bcb4b4e-ba9c-4c25-a225-5a9b4e78f351",
            "type": "ewma",
            "detectorConfig": { "alpha": 0.15, "weakSigmas": 3.0, "strongSigmas": 4.0 }
        }"#;
        let doc: DetectorDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.detector_type, "ewma");
        assert_eq!(doc.detector_config["alpha"], 0.15);
        assert!(doc.last_updated.is_none());
    }
}
