//! Crop/soil profile recommendations: request checks, prompt, reply parsing
//!
//! Parsing never fails the call. A reply that does not hold a recommendation
//! object degrades to [`RecommendationOutcome::RawFallback`] with the text
//! kept verbatim.

use thiserror::Error;

use crate::models::{Recommendation, RecommendationOutcome, RecommendationRequest};

/// Marker carried by the raw fallback variant
pub const PARSE_FAILURE_MESSAGE: &str = "Response could not be parsed as structured data";

const FENCE: &str = "```";

/// A profile request missing a required field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileRequestError {
    #[error("Crop type is required")]
    MissingCropType,
    #[error("Soil type is required")]
    MissingSoilType,
}

impl ProfileRequestError {
    /// Request field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ProfileRequestError::MissingCropType => "cropType",
            ProfileRequestError::MissingSoilType => "soilType",
        }
    }
}

impl RecommendationRequest {
    /// Both crop and soil type must be non-blank
    pub fn validate(&self) -> Result<(), ProfileRequestError> {
        if self.crop_type.trim().is_empty() {
            return Err(ProfileRequestError::MissingCropType);
        }
        if self.soil_type.trim().is_empty() {
            return Err(ProfileRequestError::MissingSoilType);
        }
        Ok(())
    }
}

/// Target JSON shape sent to the provider
pub const RECOMMENDATION_SCHEMA: &str = r#"{
  "fertilizerRecommendations": {
    "nitrogen": { "amount": "kg/hectare", "timing": "when to apply", "type": "recommended fertilizer type" },
    "phosphorus": { "amount": "kg/hectare", "timing": "when to apply", "type": "recommended fertilizer type" },
    "potassium": { "amount": "kg/hectare", "timing": "when to apply", "type": "recommended fertilizer type" },
    "micronutrients": ["recommended micronutrients with amounts"]
  },
  "pestManagement": {
    "commonPests": ["common pests for this crop"],
    "preventiveMeasures": ["preventive measures"],
    "organicSolutions": ["organic pest control methods"],
    "chemicalOptions": ["chemical options if needed"],
    "monitoringTips": ["monitoring recommendations"]
  },
  "irrigationAdvice": {
    "frequency": "irrigation frequency",
    "amount": "water amount",
    "method": "irrigation method",
    "criticalStages": ["growth stages needing more water"]
  },
  "seasonalTips": ["5-7 actionable seasonal farming tips"],
  "yieldPrediction": {
    "expectedYield": "estimated yield range",
    "factors": ["key factors affecting yield"]
  }
}"#;

/// Prompt for a profile recommendation
pub fn build_prompt(request: &RecommendationRequest) -> String {
    let area = request
        .area
        .filter(|a| a.is_finite())
        .map(|a| a.to_string())
        .unwrap_or_else(|| "Not specified".to_string());
    let season = request
        .season
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("Current season");

    format!(
        "You are an agricultural consultant. Give fertilizer and pest management \
         recommendations for this farm:\n\n\
         Crop Type: {crop}\n\
         Soil Type: {soil}\n\
         Area: {area} hectares\n\
         Season: {season}\n\n\
         Answer in JSON with this structure:\n{schema}\n\n\
         Keep every recommendation specific and actionable.",
        crop = request.crop_type.trim(),
        soil = request.soil_type.trim(),
        area = area,
        season = season,
        schema = RECOMMENDATION_SCHEMA,
    )
}

fn fenced_after<'a>(text: &'a str, opening: &str) -> Option<&'a str> {
    let start = text.find(opening)? + opening.len();
    let body = &text[start..];
    let end = body.find(&format!("\n{}", FENCE))?;
    Some(&body[..end])
}

/// Candidate JSON text in a provider reply.
///
/// Prefers a ```` ```json ```` block, then a bare ```` ``` ```` block, then the
/// whole content.
pub fn extract_json_block(content: &str) -> &str {
    fenced_after(content, "```json\n")
        .or_else(|| fenced_after(content, "```\n"))
        .unwrap_or(content)
}

/// Span from the first `{` to the last `}`, if any
pub fn find_json_object(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    (end > start).then(|| &content[start..=end])
}

/// Parse a provider reply, degrading to the raw text on failure.
///
/// Any JSON object counts as structured; section shapes are not checked.
pub fn parse_recommendation(content: &str) -> RecommendationOutcome {
    match serde_json::from_str::<Recommendation>(extract_json_block(content).trim()) {
        Ok(recommendation) => RecommendationOutcome::Structured(recommendation),
        Err(_) => RecommendationOutcome::RawFallback {
            raw_response: content.to_string(),
            error: PARSE_FAILURE_MESSAGE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(crop: &str, soil: &str) -> RecommendationRequest {
        RecommendationRequest {
            crop_type: crop.to_string(),
            soil_type: soil.to_string(),
            area: None,
            season: None,
        }
    }

    #[test]
    fn test_validate_requires_both_fields() {
        assert_eq!(
            request("", "Clay").validate(),
            Err(ProfileRequestError::MissingCropType)
        );
        assert_eq!(
            request("Rice", "  ").validate(),
            Err(ProfileRequestError::MissingSoilType)
        );
        assert!(request("Rice", "Clay").validate().is_ok());
    }

    #[test]
    fn test_prompt_defaults_optional_inputs() {
        let prompt = build_prompt(&request("Cotton", "Black soil"));
        assert!(prompt.contains("Crop Type: Cotton"));
        assert!(prompt.contains("Soil Type: Black soil"));
        assert!(prompt.contains("Area: Not specified hectares"));
        assert!(prompt.contains("Season: Current season"));
        assert!(prompt.contains("\"fertilizerRecommendations\""));
    }

    #[test]
    fn test_prompt_embeds_area_and_season() {
        let req = RecommendationRequest {
            area: Some(2.5),
            season: Some("Kharif".to_string()),
            ..request("Rice", "Clay")
        };
        let prompt = build_prompt(&req);
        assert!(prompt.contains("Area: 2.5 hectares"));
        assert!(prompt.contains("Season: Kharif"));
    }

    #[test]
    fn test_extract_prefers_json_fence() {
        let text = "```\n{\"a\":1}\n```\n```json\n{\"b\":2}\n```";
        assert_eq!(extract_json_block(text), "{\"b\":2}");
        assert_eq!(extract_json_block("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json_block("{\"c\":3}"), "{\"c\":3}");
    }

    #[test]
    fn test_find_json_object_span() {
        assert_eq!(find_json_object("x {\"a\":{}} y"), Some("{\"a\":{}}"));
        assert_eq!(find_json_object("} nothing {"), None);
        assert_eq!(find_json_object("plain"), None);
    }

    #[test]
    fn test_parse_fenced_reply_is_structured() {
        let content = "Here is the plan:\n```json\n{\"fertilizerRecommendations\":{\"nitrogen\":{\"amount\":\"100 kg/ha\"}}}\n```";
        let outcome = parse_recommendation(content);
        let rec = outcome.structured().unwrap();
        assert_eq!(
            rec.pointer("/fertilizerRecommendations/nitrogen/amount"),
            Some(&serde_json::Value::from("100 kg/ha"))
        );
    }

    #[test]
    fn test_parse_prose_is_raw() {
        let content = "I cannot help with that right now.";
        assert_eq!(
            parse_recommendation(content),
            RecommendationOutcome::RawFallback {
                raw_response: content.to_string(),
                error: PARSE_FAILURE_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn test_parse_off_schema_object_is_structured() {
        let outcome = parse_recommendation("{\"seasonalTips\": \"water often\"}");
        assert_eq!(
            outcome.structured().and_then(|r| r.section("seasonalTips")),
            Some(&serde_json::Value::from("water often"))
        );
    }

    #[test]
    fn test_parse_numeric_amount_is_structured() {
        let content = "```json\n{\"fertilizerRecommendations\":{\"nitrogen\":{\"amount\":120,\"timing\":\"Basal\"}}}\n```";
        let outcome = parse_recommendation(content);
        assert_eq!(
            outcome
                .structured()
                .and_then(|r| r.pointer("/fertilizerRecommendations/nitrogen/amount")),
            Some(&serde_json::Value::from(120))
        );
    }

    #[test]
    fn test_parse_object_micronutrients_is_structured() {
        let content = r#"{"fertilizerRecommendations":{"micronutrients":[{"name":"Zinc","amount":"5 kg/ha"}]}}"#;
        let outcome = parse_recommendation(content);
        assert_eq!(
            outcome
                .structured()
                .and_then(|r| r.pointer("/fertilizerRecommendations/micronutrients/0/name")),
            Some(&serde_json::Value::from("Zinc"))
        );
    }

    #[test]
    fn test_parse_non_object_json_is_raw() {
        assert!(!parse_recommendation("[1, 2, 3]").is_structured());
        assert!(!parse_recommendation("\"just a string\"").is_structured());
    }
}
