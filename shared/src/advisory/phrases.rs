//! Fixed advisory phrasing per language
//!
//! Each language is one table of `(PhraseId, template)` rows. Templates use
//! `{name}` placeholders filled by [`render`]. Adding a language means adding
//! a table and one arm in [`table`].

use crate::types::Language;

/// Identifier of one advisory branch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhraseId {
    NitrogenLow,
    PhosphorusLow,
    PotassiumLow,
    NutrientsBalanced,
    SoilStatus,
    PhAcidic,
    PhAlkaline,
    PhOptimal,
    IrrigationDry,
    IrrigationWet,
    IrrigationNormal,
    PestWarning,
    CropHealth,
    PlanIrrigateNow,
    PlanMonitorMoisture,
    PlanApplyFertilizer,
    PlanCheckGrowth,
    PlanInspectPests,
}

impl PhraseId {
    pub const ALL: [PhraseId; 18] = [
        PhraseId::NitrogenLow,
        PhraseId::PhosphorusLow,
        PhraseId::PotassiumLow,
        PhraseId::NutrientsBalanced,
        PhraseId::SoilStatus,
        PhraseId::PhAcidic,
        PhraseId::PhAlkaline,
        PhraseId::PhOptimal,
        PhraseId::IrrigationDry,
        PhraseId::IrrigationWet,
        PhraseId::IrrigationNormal,
        PhraseId::PestWarning,
        PhraseId::CropHealth,
        PhraseId::PlanIrrigateNow,
        PhraseId::PlanMonitorMoisture,
        PhraseId::PlanApplyFertilizer,
        PhraseId::PlanCheckGrowth,
        PhraseId::PlanInspectPests,
    ];
}

type PhraseTable = &'static [(PhraseId, &'static str)];

const ENGLISH: PhraseTable = &[
    (PhraseId::NitrogenLow, "Nitrogen is low. Apply 20 kg urea per acre."),
    (PhraseId::PhosphorusLow, "Phosphorus is low. Apply DAP fertilizer."),
    (PhraseId::PotassiumLow, "Potassium is low. Apply MOP fertilizer."),
    (
        PhraseId::NutrientsBalanced,
        "Your soil nutrients are at good levels. Continue balanced fertilization.",
    ),
    (PhraseId::SoilStatus, "Soil status: N={n}, P={p}, K={k} mg/kg."),
    (PhraseId::PhAcidic, "Soil is acidic. Apply lime to raise pH."),
    (PhraseId::PhAlkaline, "Soil is alkaline. Apply sulfur to lower pH."),
    (PhraseId::PhOptimal, "pH is optimal."),
    (
        PhraseId::IrrigationDry,
        "Soil is dry ({moisture}%). Irrigate immediately. Water 3-4 times daily.",
    ),
    (
        PhraseId::IrrigationWet,
        "Soil is too wet ({moisture}%). Stop watering. Allow soil to dry.",
    ),
    (
        PhraseId::IrrigationNormal,
        "Soil moisture is good ({moisture}%). Water lightly 2 times daily as needed.",
    ),
    (PhraseId::PestWarning, "{label} pest risk"),
    (PhraseId::CropHealth, "Crop health: {label}"),
    (PhraseId::PlanIrrigateNow, "Irrigate crops immediately"),
    (PhraseId::PlanMonitorMoisture, "Monitor soil moisture daily"),
    (PhraseId::PlanApplyFertilizer, "Apply recommended fertilizers"),
    (PhraseId::PlanCheckGrowth, "Check crop growth progress"),
    (
        PhraseId::PlanInspectPests,
        "Inspect for pests and apply pesticides if needed",
    ),
];

const TELUGU: PhraseTable = &[
    (
        PhraseId::NitrogenLow,
        "నైట్రోజన్ తక్కువగా ఉంది. ఎకరాకు 20 కిలోల యూరియా వేయండి.",
    ),
    (PhraseId::PhosphorusLow, "భాస్వరం తక్కువగా ఉంది. DAP ఎరువు వేయండి."),
    (PhraseId::PotassiumLow, "పొటాషియం తక్కువగా ఉంది. MOP ఎరువు వేయండి."),
    (
        PhraseId::NutrientsBalanced,
        "మీ నేల పోషకాలు సరైన స్థాయిలో ఉన్నాయి. సమతుల్య ఎరువులు కొనసాగించండి.",
    ),
    (PhraseId::SoilStatus, "నేల స్థితి: N={n}, P={p}, K={k} mg/kg."),
    (PhraseId::PhAcidic, "నేల ఆమ్లంగా ఉంది. సున్నం వేయండి."),
    (PhraseId::PhAlkaline, "నేల క్షారంగా ఉంది. గంధకం వేయండి."),
    (PhraseId::PhOptimal, "pH సరైనది."),
    (
        PhraseId::IrrigationDry,
        "నేల పొడిగా ఉంది ({moisture}%). వెంటనే నీరు పెట్టండి. రోజుకు 3-4 సార్లు నీరు పెట్టండి.",
    ),
    (
        PhraseId::IrrigationWet,
        "నేల తడిగా ఉంది ({moisture}%). నీరు పెట్టడం ఆపండి. నేల ఎండిపోనివ్వండి.",
    ),
    (
        PhraseId::IrrigationNormal,
        "నేల తేమ మంచిగా ఉంది ({moisture}%). రోజుకు 2 సార్లు తేలికగా నీరు పెట్టండి.",
    ),
    (PhraseId::PestWarning, "చీడపురుగుల ప్రమాదం: {label}"),
    (PhraseId::CropHealth, "పంట ఆరోగ్యం: {label}"),
    (PhraseId::PlanIrrigateNow, "వెంటనే పంటకు నీరు పెట్టండి"),
    (PhraseId::PlanMonitorMoisture, "నేల తేమను తనిఖీ చేయండి"),
    (PhraseId::PlanApplyFertilizer, "అవసరమైన ఎరువులు వేయండి"),
    (PhraseId::PlanCheckGrowth, "పంట పెరుగుదలను పరిశీలించండి"),
    (
        PhraseId::PlanInspectPests,
        "చీడపురుగులు ఉన్నాయా తనిఖీ చేసి మందులు చల్లండి",
    ),
];

fn table(language: Language) -> PhraseTable {
    match language {
        Language::English => ENGLISH,
        Language::Telugu => TELUGU,
    }
}

fn lookup(table: PhraseTable, id: PhraseId) -> Option<&'static str> {
    table
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, template)| *template)
}

/// Template for `id` in `language`, falling back to English
pub fn phrase(language: Language, id: PhraseId) -> &'static str {
    lookup(table(language), id)
        .or_else(|| lookup(ENGLISH, id))
        .unwrap_or_default()
}

/// Fill `{name}` placeholders in a template
pub fn render(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{}}}", name), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_language_has_every_phrase() {
        for language in Language::ALL {
            for id in PhraseId::ALL {
                assert!(
                    lookup(table(language), id).is_some(),
                    "{:?} missing {:?}",
                    language,
                    id
                );
            }
        }
    }

    #[test]
    fn test_render_fills_placeholders() {
        let text = render(
            phrase(Language::English, PhraseId::SoilStatus),
            &[("n", "30"), ("p", "35"), ("k", "200")],
        );
        assert_eq!(text, "Soil status: N=30, P=35, K=200 mg/kg.");
    }

    #[test]
    fn test_render_leaves_unknown_placeholders() {
        assert_eq!(render("{a} and {b}", &[("a", "x")]), "x and {b}");
    }
}
