//! Advisory composition
//!
//! [`compose`] turns a fully defaulted [`AdvisoryInputs`] bundle into a
//! localized [`Advisory`]. It never sees a missing value; [`describe`] is the
//! snapshot entry point and applies the defaults first. All wording comes
//! from the phrase tables in [`phrases`], so the branching below is the same
//! for every language.

pub mod ai;
pub mod phrases;

use crate::classifier::{classify_inputs, Thresholds};
use crate::models::{
    Advisory, AdvisoryInputs, AdvisorySource, FarmSnapshot, MoistureStatus, NutrientStatus,
    PestRisk, PhStatus, StatusReport,
};
use crate::types::Language;

use phrases::{phrase, render, PhraseId};

/// Rule-based advisory for a snapshot, with documented defaults for gaps
pub fn describe(snapshot: &FarmSnapshot, language: Language, thresholds: &Thresholds) -> Advisory {
    compose(&snapshot.with_defaults(), language, thresholds)
}

/// Rule-based advisory for a defaulted numeric bundle
pub fn compose(inputs: &AdvisoryInputs, language: Language, thresholds: &Thresholds) -> Advisory {
    let status = classify_inputs(inputs, thresholds);

    Advisory {
        language,
        source: AdvisorySource::Rules,
        fertilizer_plan: fertilizer_plan(&status, language),
        soil_advice: soil_advice(inputs, &status, language),
        irrigation: irrigation_advice(inputs, &status, language),
        pest_warning: status.pest_risk,
        pest_warning_text: pest_warning_text(status.pest_risk, language),
        crop_health_status: status.crop_health,
        crop_health_text: crop_health_text(&status, language),
        action_plan: action_plan(&status, language),
    }
}

/// One clause per low nutrient, or the balanced sentence when none is low
pub fn fertilizer_plan(status: &StatusReport, language: Language) -> String {
    let clauses: Vec<&str> = [
        (status.nitrogen, PhraseId::NitrogenLow),
        (status.phosphorus, PhraseId::PhosphorusLow),
        (status.potassium, PhraseId::PotassiumLow),
    ]
    .into_iter()
    .filter(|(nutrient, _)| *nutrient == NutrientStatus::Low)
    .map(|(_, id)| phrase(language, id))
    .collect();

    if clauses.is_empty() {
        phrase(language, PhraseId::NutrientsBalanced).to_string()
    } else {
        clauses.join(" ")
    }
}

pub fn soil_advice(inputs: &AdvisoryInputs, status: &StatusReport, language: Language) -> String {
    let n = format!("{:.0}", inputs.nitrogen);
    let p = format!("{:.0}", inputs.phosphorus);
    let k = format!("{:.0}", inputs.potassium);
    let npk = render(
        phrase(language, PhraseId::SoilStatus),
        &[("n", &n), ("p", &p), ("k", &k)],
    );

    let ph_clause = match status.ph {
        PhStatus::Acidic => PhraseId::PhAcidic,
        PhStatus::Alkaline => PhraseId::PhAlkaline,
        // Unknown only arises from a non-finite pH in a hand-built bundle
        PhStatus::Neutral | PhStatus::Unknown => PhraseId::PhOptimal,
    };

    format!("{} {}", npk, phrase(language, ph_clause))
}

pub fn irrigation_advice(
    inputs: &AdvisoryInputs,
    status: &StatusReport,
    language: Language,
) -> String {
    let branch = match status.moisture {
        MoistureStatus::Dry => PhraseId::IrrigationDry,
        MoistureStatus::Wet => PhraseId::IrrigationWet,
        MoistureStatus::Normal | MoistureStatus::Unknown => PhraseId::IrrigationNormal,
    };
    let moisture = format!("{:.0}", inputs.moisture);

    render(phrase(language, branch), &[("moisture", &moisture)])
}

pub fn pest_warning_text(risk: PestRisk, language: Language) -> String {
    render(
        phrase(language, PhraseId::PestWarning),
        &[("label", risk.label(language))],
    )
}

fn crop_health_text(status: &StatusReport, language: Language) -> String {
    render(
        phrase(language, PhraseId::CropHealth),
        &[("label", status.crop_health.label(language))],
    )
}

/// Moisture entry, then nutrient entry, then pest inspection only on high risk
pub fn action_plan(status: &StatusReport, language: Language) -> Vec<String> {
    let first = if status.moisture == MoistureStatus::Dry {
        PhraseId::PlanIrrigateNow
    } else {
        PhraseId::PlanMonitorMoisture
    };
    let second = if status.any_nutrient_low() {
        PhraseId::PlanApplyFertilizer
    } else {
        PhraseId::PlanCheckGrowth
    };

    let mut plan = vec![
        phrase(language, first).to_string(),
        phrase(language, second).to_string(),
    ];
    if status.pest_risk == PestRisk::High {
        plan.push(phrase(language, PhraseId::PlanInspectPests).to_string());
    }
    plan
}
