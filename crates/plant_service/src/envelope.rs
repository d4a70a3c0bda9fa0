//! JSON bodies returned to the browser.

use chrono::{DateTime, Utc};
use plant_client::PlantSuggestion;
use serde::{Deserialize, Serialize};

pub const SERVICE_NAME: &str = "Plant ID Backend Proxy";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SuggestionList {
    pub suggestions: Vec<PlantSuggestion>,
}

/// Uniform result of an identification request. Exactly one of `data` and
/// `error` is set, gated by `success`; use the constructors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationEnvelope {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SuggestionList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_mock: Option<bool>,
}

impl IdentificationEnvelope {
    pub fn success(suggestions: Vec<PlantSuggestion>, is_mock: bool) -> Self {
        Self {
            success: true,
            data: Some(SuggestionList { suggestions }),
            error: None,
            timestamp: Utc::now(),
            is_mock: Some(is_mock),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
            is_mock: None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let value = serde_json::to_value(IdentificationEnvelope::success(vec![], true)).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["isMock"], true);
        assert_eq!(value["data"]["suggestions"], serde_json::json!([]));
        assert!(value.get("error").is_none());
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn failure_envelope_shape() {
        let envelope = IdentificationEnvelope::failure("No image provided");
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "No image provided");
        assert!(value.get("data").is_none());
        assert!(value.get("isMock").is_none());
    }
}
