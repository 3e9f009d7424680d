//! Crop/soil profile recommendation models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request for profile-based recommendations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    #[serde(default)]
    pub crop_type: String,
    #[serde(default)]
    pub soil_type: String,
    /// Area in hectares
    pub area: Option<f64>,
    pub season: Option<String>,
}

/// Structured recommendation returned by the completion provider.
///
/// Taken as-is: any JSON object the provider sends is kept, whatever the
/// shape of its sections. Keys follow `RECOMMENDATION_SCHEMA` when the
/// provider honors the prompt.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Recommendation(pub Map<String, Value>);

impl Recommendation {
    /// Top-level section by its camelCase key
    pub fn section(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Value at a JSON pointer such as `/fertilizerRecommendations/nitrogen/amount`
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = rest.split_once('/').unwrap_or((rest, ""));
        let section = self.0.get(head)?;
        if tail.is_empty() {
            Some(section)
        } else {
            section.pointer(&format!("/{}", tail))
        }
    }
}

/// Result of a profile recommendation call.
///
/// Exactly one shape is populated: the parsed structure, or the provider's
/// text verbatim with a parse-failure marker.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum RecommendationOutcome {
    Structured(Recommendation),
    #[serde(rename_all = "camelCase")]
    RawFallback { raw_response: String, error: String },
}

impl RecommendationOutcome {
    pub fn is_structured(&self) -> bool {
        matches!(self, RecommendationOutcome::Structured(_))
    }

    pub fn structured(&self) -> Option<&Recommendation> {
        match self {
            RecommendationOutcome::Structured(r) => Some(r),
            RecommendationOutcome::RawFallback { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_fallback_serializes_camel_case() {
        let outcome = RecommendationOutcome::RawFallback {
            raw_response: "plain text".to_string(),
            error: "unparsed".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["rawResponse"], "plain text");
        assert_eq!(json["error"], "unparsed");
        assert!(json.get("fertilizerRecommendations").is_none());
    }

    #[test]
    fn test_recommendation_keeps_any_section_shape() {
        let rec: Recommendation = serde_json::from_str(
            r#"{"fertilizerRecommendations":{"nitrogen":{"amount":120,"type":"Urea"}},"notes":"extra"}"#,
        )
        .unwrap();
        assert_eq!(rec.pointer("/fertilizerRecommendations/nitrogen/amount"), Some(&Value::from(120)));
        assert_eq!(rec.pointer("/fertilizerRecommendations/nitrogen/type"), Some(&Value::from("Urea")));
        assert_eq!(rec.section("notes"), Some(&Value::from("extra")));
        assert!(rec.section("seasonalTips").is_none());
        assert!(rec.pointer("no-slash").is_none());
    }

    #[test]
    fn test_recommendation_serializes_unchanged() {
        let body = r#"{"seasonalTips":"water often","yieldPrediction":{"factors":[{"name":"rain"}]}}"#;
        let rec: Recommendation = serde_json::from_str(body).unwrap();
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json, serde_json::from_str::<Value>(body).unwrap());
    }

    #[test]
    fn test_request_uses_camel_case() {
        let req: RecommendationRequest =
            serde_json::from_str(r#"{"cropType":"Rice","soilType":"Clay","area":2.5}"#).unwrap();
        assert_eq!(req.crop_type, "Rice");
        assert_eq!(req.soil_type, "Clay");
        assert_eq!(req.area, Some(2.5));
        assert_eq!(req.season, None);
    }
}
