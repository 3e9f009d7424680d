//! WebAssembly module for the Smart Agri Advisory platform
//!
//! Provides client-side computation for:
//! - Farm status classification
//! - Rule-based advisories in English and Telugu
//! - Parsing recommendation replies
//! - Offline reading validation

use std::str::FromStr;

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::{classify_values, compose, Thresholds};

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization failed: {}", e))
}

fn classify_json(values_json: &str) -> Result<String, String> {
    let values: SnapshotValues = serde_json::from_str(values_json)
        .map_err(|e| format!("Invalid snapshot JSON: {}", e))?;
    to_json(&classify_values(&values, &Thresholds::default()))
}

fn advisory_json(values_json: &str, lang: &str) -> Result<String, String> {
    let values: SnapshotValues = serde_json::from_str(values_json)
        .map_err(|e| format!("Invalid snapshot JSON: {}", e))?;
    let language = Language::from_str(lang)?;
    let inputs = values.with_defaults(&AdvisoryInputs::default());
    to_json(&compose(&inputs, language, &Thresholds::default()))
}

/// Classify optional snapshot values; absent fields come back `unknown`
#[wasm_bindgen]
pub fn classify_snapshot(values_json: &str) -> Result<String, JsValue> {
    classify_json(values_json).map_err(|e| JsValue::from_str(&e))
}

/// Rule-based advisory for optional snapshot values in `lang` (`en` or `te`)
#[wasm_bindgen]
pub fn compose_advisory(values_json: &str, lang: &str) -> Result<String, JsValue> {
    advisory_json(values_json, lang).map_err(|e| JsValue::from_str(&e))
}

/// Parse a completion reply into a recommendation or its raw fallback
#[wasm_bindgen]
pub fn parse_recommendation_response(content: &str) -> String {
    let outcome = shared::parse_recommendation(content);
    to_json(&outcome).unwrap_or_else(|e| e)
}

/// Check a reading before upload; returns the validation message or an empty string
#[wasm_bindgen]
pub fn validate_reading(reading_json: &str) -> String {
    use validator::Validate;

    match serde_json::from_str::<RecordReadingInput>(reading_json) {
        Ok(input) if input.is_empty() => "At least one measurement is required".to_string(),
        Ok(input) => input.validate().err().map(|e| e.to_string()).unwrap_or_default(),
        Err(e) => format!("Invalid reading JSON: {}", e),
    }
}

/// Whether the coordinates are a valid GPS position
#[wasm_bindgen]
pub fn is_valid_location(latitude: f64, longitude: f64) -> bool {
    validate_coordinates(latitude, longitude).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_snapshot() {
        let json = classify_json(r#"{"nitrogen":30.0,"moisture":20.0,"ph":null}"#).unwrap();
        let status: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(status["nitrogen"], "low");
        assert_eq!(status["moisture"], "dry");
        assert_eq!(status["ph"], "unknown");
        assert_eq!(status["pest_risk"], "unknown");
    }

    #[test]
    fn test_compose_advisory_in_telugu() {
        let json = advisory_json(r#"{"nitrogen":30.0}"#, "te").unwrap();
        let advisory: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(advisory["language"], "te");
        assert_eq!(advisory["source"], "rules");
        assert_eq!(advisory["action_plan"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_compose_advisory_rejects_unknown_language() {
        assert!(advisory_json("{}", "fr").is_err());
        assert!(classify_json("not json").is_err());
    }

    #[test]
    fn test_parse_recommendation_response() {
        let raw = parse_recommendation_response("Use compost.");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["rawResponse"], "Use compost.");

        let structured = parse_recommendation_response(r#"{"seasonalTips":["Mulch"]}"#);
        let value: serde_json::Value = serde_json::from_str(&structured).unwrap();
        assert_eq!(value["seasonalTips"][0], "Mulch");
    }

    #[test]
    fn test_validate_reading() {
        assert_eq!(validate_reading(r#"{"n_value":40.0}"#), "");
        assert!(!validate_reading(r#"{"soil_ph":15.0}"#).is_empty());
        assert!(!validate_reading("{}").is_empty());
    }

    #[test]
    fn test_location_validation() {
        assert!(is_valid_location(17.4065, 78.4772));
        assert!(!is_valid_location(91.0, 0.0));
    }
}
