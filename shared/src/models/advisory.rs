//! Farm advisory models

use serde::{Deserialize, Serialize};

use super::status::{CropHealth, PestRisk};
use crate::types::Language;

/// How an advisory was produced
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySource {
    /// Deterministic rule engine
    Rules,
    /// External completion provider
    Ai,
}

/// Localized, actionable guidance for one farm snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Advisory {
    pub language: Language,
    pub source: AdvisorySource,
    pub fertilizer_plan: String,
    pub soil_advice: String,
    pub irrigation: String,
    pub pest_warning: PestRisk,
    pub pest_warning_text: String,
    pub crop_health_status: CropHealth,
    pub crop_health_text: String,
    /// Two entries, or three when pest risk is high
    pub action_plan: Vec<String>,
}
