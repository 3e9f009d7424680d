//! Recommendation parsing integration tests
//!
//! Tests for the crop/soil profile path including:
//! - Request validation before any provider call
//! - Fenced, bare and prose provider replies
//! - Raw fallback preserving the reply verbatim

use proptest::prelude::*;
use serde_json::json;
use shared::{
    build_prompt, parse_recommendation, ProfileRequestError, RecommendationOutcome,
    RecommendationRequest, PARSE_FAILURE_MESSAGE,
};

fn request(crop: &str, soil: &str) -> RecommendationRequest {
    RecommendationRequest {
        crop_type: crop.to_string(),
        soil_type: soil.to_string(),
        area: None,
        season: None,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_empty_fields_fail_validation() {
        assert_eq!(
            request("", "Loam").validate(),
            Err(ProfileRequestError::MissingCropType)
        );
        assert_eq!(
            request("Cotton", "").validate(),
            Err(ProfileRequestError::MissingSoilType)
        );
        assert!(request("Cotton", "Black soil").validate().is_ok());
    }

    #[test]
    fn test_prompt_carries_profile() {
        let req = RecommendationRequest {
            area: Some(1.5),
            season: Some("Kharif".to_string()),
            ..request("Cotton", "Black soil")
        };
        let prompt = build_prompt(&req);

        assert!(prompt.contains("Crop Type: Cotton"));
        assert!(prompt.contains("Soil Type: Black soil"));
        assert!(prompt.contains("Area: 1.5 hectares"));
        assert!(prompt.contains("Season: Kharif"));
        assert!(prompt.contains("fertilizerRecommendations"));
    }

    #[test]
    fn test_reply_with_json_fence_is_structured() {
        let reply = "Here is the plan:\n```json\n{\"fertilizerRecommendations\":{\"nitrogen\":{\"amount\":\"100 kg/ha\",\"timing\":\"Basal\",\"type\":\"Urea\"}}}\n```";

        match parse_recommendation(reply) {
            RecommendationOutcome::Structured(rec) => {
                assert_eq!(
                    rec.pointer("/fertilizerRecommendations/nitrogen/amount"),
                    Some(&json!("100 kg/ha"))
                );
                assert_eq!(
                    rec.pointer("/fertilizerRecommendations/nitrogen/type"),
                    Some(&json!("Urea"))
                );
            }
            other => panic!("expected structured, got {:?}", other),
        }
    }

    #[test]
    fn test_reply_with_plain_fence_is_structured() {
        let reply = "```\n{\"seasonalTips\":[\"Sow after first rains\"]}\n```";
        let outcome = parse_recommendation(reply);
        assert!(outcome.is_structured());
    }

    #[test]
    fn test_bare_json_reply_is_structured() {
        let reply = r#"{"yieldPrediction":{"expectedYield":"2-3 t/ha","factors":["rainfall"]}}"#;
        let outcome = parse_recommendation(reply);
        assert_eq!(
            outcome
                .structured()
                .and_then(|r| r.pointer("/yieldPrediction/expectedYield")),
            Some(&json!("2-3 t/ha"))
        );
    }

    #[test]
    fn test_numeric_and_object_leaves_stay_structured() {
        let reply = "```json\n{\"fertilizerRecommendations\":{\"nitrogen\":{\"amount\":120},\"micronutrients\":[{\"name\":\"Zinc\",\"amount\":\"5 kg/ha\"}]}}\n```";
        let outcome = parse_recommendation(reply);
        let rec = outcome.structured().expect("valid JSON object stays structured");

        assert_eq!(
            rec.pointer("/fertilizerRecommendations/nitrogen/amount"),
            Some(&json!(120))
        );
        assert_eq!(
            rec.pointer("/fertilizerRecommendations/micronutrients/0"),
            Some(&json!({"name": "Zinc", "amount": "5 kg/ha"}))
        );
        assert_eq!(
            serde_json::to_value(&outcome).unwrap()["fertilizerRecommendations"]["nitrogen"]["amount"],
            120
        );
    }

    #[test]
    fn test_prose_reply_keeps_text_verbatim() {
        let reply = "Apply farmyard manure before sowing.\nRotate with pulses.";
        assert_eq!(
            parse_recommendation(reply),
            RecommendationOutcome::RawFallback {
                raw_response: reply.to_string(),
                error: PARSE_FAILURE_MESSAGE.to_string(),
            }
        );
    }

    #[test]
    fn test_raw_fallback_serializes_camel_case() {
        let json = serde_json::to_value(parse_recommendation("no json here")).unwrap();
        assert_eq!(json["rawResponse"], "no json here");
        assert_eq!(json["error"], PARSE_FAILURE_MESSAGE);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Replies with no JSON-shaped content fall back with the text unchanged
        #[test]
        fn prop_prose_falls_back_verbatim(reply in "[a-zA-Z0-9 .,:;!?\\n-]{0,200}") {
            match parse_recommendation(&reply) {
                RecommendationOutcome::RawFallback { raw_response, error } => {
                    prop_assert_eq!(raw_response, reply);
                    prop_assert_eq!(error, PARSE_FAILURE_MESSAGE);
                }
                RecommendationOutcome::Structured(_) => {
                    prop_assert!(false, "prose parsed as structured: {:?}", reply);
                }
            }
        }

        /// Whitespace-only crop or soil types never validate
        #[test]
        fn prop_blank_fields_rejected(blank in "[ \\t]{0,5}", filled in "[A-Za-z]{1,12}") {
            prop_assert!(request(&blank, &filled).validate().is_err());
            prop_assert!(request(&filled, &blank).validate().is_err());
            prop_assert!(request(&filled, &filled).validate().is_ok());
        }
    }
}
