//! Completion-backed advisory: prompt construction and response parsing
//!
//! The provider writes the prose. Categories (pest risk, crop health) are
//! still taken from the classifier so both advisory sources agree on them.

use serde::Deserialize;

use super::{action_plan, crop_health_text};
use crate::classifier::{classify_inputs, Thresholds};
use crate::models::{Advisory, AdvisoryInputs, AdvisorySource, SnapshotValues};
use crate::recommendation::{extract_json_block, find_json_object};
use crate::types::Language;

/// Longest action plan accepted from the provider
const MAX_PLAN_ENTRIES: usize = 3;

fn or_unknown(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Prompt asking the provider for an advisory in `language`.
///
/// Absent values are written as `unknown`; the provider is not given defaults.
pub fn build_advisory_prompt(values: &SnapshotValues, language: Language) -> String {
    let script = match language {
        Language::English => "Write in English.",
        Language::Telugu => "Write in Telugu script.",
    };

    format!(
        r#"You are an agricultural advisor for smallholder farmers. Read the farm data below and give advice in {language} using short, simple sentences.

Farm data:
- Nitrogen (N): {n} mg/kg
- Phosphorus (P): {p} mg/kg
- Potassium (K): {k} mg/kg
- Soil pH: {ph}
- Soil moisture: {moisture}%
- Temperature: {temperature}°C
- Humidity: {humidity}%
- NDVI (crop health): {ndvi}

Reply with a single JSON object with exactly these fields:
{{
  "fertilizer_plan": "fertilizer steps with quantities",
  "soil_advice": "N, P, K and pH status with advice",
  "irrigation": "water amount, timing and frequency",
  "pest_warning": "low/medium/high risk with explanation",
  "crop_health_status": "healthy/improving/stress with explanation",
  "two_day_action_plan": ["action 1", "action 2"]
}}

Rules:
- {script}
- Give concrete quantities, for example "20 kg urea per acre".
- Keep the action plan to two or three items."#,
        language = language.display_name(),
        n = or_unknown(values.nitrogen),
        p = or_unknown(values.phosphorus),
        k = or_unknown(values.potassium),
        ph = or_unknown(values.ph),
        moisture = or_unknown(values.moisture),
        temperature = or_unknown(values.temperature),
        humidity = or_unknown(values.humidity),
        ndvi = or_unknown(values.ndvi),
        script = script,
    )
}

#[derive(Debug, Deserialize)]
struct AdvisoryPayload {
    fertilizer_plan: String,
    soil_advice: String,
    irrigation: String,
    #[serde(default)]
    pest_warning: String,
    #[serde(default)]
    crop_health_status: String,
    #[serde(default)]
    two_day_action_plan: Vec<String>,
}

fn parse_payload(content: &str) -> Option<AdvisoryPayload> {
    serde_json::from_str(extract_json_block(content))
        .ok()
        .or_else(|| find_json_object(content).and_then(|span| serde_json::from_str(span).ok()))
}

fn non_blank(text: String) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse a provider reply into an [`Advisory`] tagged [`AdvisorySource::Ai`].
///
/// Returns `None` when the reply holds no usable advisory; callers then fall
/// back to the rule composer. `inputs` supplies the categories.
pub fn parse_advisory_response(
    content: &str,
    inputs: &AdvisoryInputs,
    language: Language,
    thresholds: &Thresholds,
) -> Option<Advisory> {
    let payload = parse_payload(content)?;
    let status = classify_inputs(inputs, thresholds);

    let fertilizer_plan = non_blank(payload.fertilizer_plan)?;
    let soil_advice = non_blank(payload.soil_advice)?;
    let irrigation = non_blank(payload.irrigation)?;

    let mut plan: Vec<String> = payload
        .two_day_action_plan
        .into_iter()
        .filter_map(non_blank)
        .take(MAX_PLAN_ENTRIES)
        .collect();
    if plan.is_empty() {
        plan = action_plan(&status, language);
    }

    Some(Advisory {
        language,
        source: AdvisorySource::Ai,
        fertilizer_plan,
        soil_advice,
        irrigation,
        pest_warning: status.pest_risk,
        pest_warning_text: non_blank(payload.pest_warning)
            .unwrap_or_else(|| super::pest_warning_text(status.pest_risk, language)),
        crop_health_status: status.crop_health,
        crop_health_text: non_blank(payload.crop_health_status)
            .unwrap_or_else(|| crop_health_text(&status, language)),
        action_plan: plan,
    })
}
