//! Categorical status models derived from snapshot values

use serde::{Deserialize, Serialize};

use crate::types::Language;

/// Nutrient level (nitrogen, phosphorus, potassium)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NutrientStatus {
    Low,
    Good,
    High,
    Unknown,
}

/// Soil pH band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PhStatus {
    Acidic,
    Neutral,
    Alkaline,
    Unknown,
}

/// Soil moisture band
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MoistureStatus {
    Dry,
    Normal,
    Wet,
    Unknown,
}

/// Pest pressure from temperature and soil moisture
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PestRisk {
    Low,
    Medium,
    High,
    Unknown,
}

/// Crop vigour bucket from the vegetation index
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CropHealth {
    Healthy,
    Improving,
    Stress,
    Unknown,
}

impl NutrientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientStatus::Low => "low",
            NutrientStatus::Good => "good",
            NutrientStatus::High => "high",
            NutrientStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, NutrientStatus::Low) => "Low",
            (Language::English, NutrientStatus::Good) => "Good",
            (Language::English, NutrientStatus::High) => "High",
            (Language::English, NutrientStatus::Unknown) => "Unknown",
            (Language::Telugu, NutrientStatus::Low) => "తక్కువ",
            (Language::Telugu, NutrientStatus::Good) => "మంచిది",
            (Language::Telugu, NutrientStatus::High) => "ఎక్కువ",
            (Language::Telugu, NutrientStatus::Unknown) => "తెలియదు",
        }
    }
}

impl PhStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhStatus::Acidic => "acidic",
            PhStatus::Neutral => "neutral",
            PhStatus::Alkaline => "alkaline",
            PhStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, PhStatus::Acidic) => "Acidic",
            (Language::English, PhStatus::Neutral) => "Good",
            (Language::English, PhStatus::Alkaline) => "Alkaline",
            (Language::English, PhStatus::Unknown) => "Unknown",
            (Language::Telugu, PhStatus::Acidic) => "ఆమ్ల",
            (Language::Telugu, PhStatus::Neutral) => "మంచిది",
            (Language::Telugu, PhStatus::Alkaline) => "క్షార",
            (Language::Telugu, PhStatus::Unknown) => "తెలియదు",
        }
    }
}

impl MoistureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MoistureStatus::Dry => "dry",
            MoistureStatus::Normal => "normal",
            MoistureStatus::Wet => "wet",
            MoistureStatus::Unknown => "unknown",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, MoistureStatus::Dry) => "Dry",
            (Language::English, MoistureStatus::Normal) => "Optimal",
            (Language::English, MoistureStatus::Wet) => "Wet",
            (Language::English, MoistureStatus::Unknown) => "Unknown",
            (Language::Telugu, MoistureStatus::Dry) => "పొడి",
            (Language::Telugu, MoistureStatus::Normal) => "సాధారణం",
            (Language::Telugu, MoistureStatus::Wet) => "తడి",
            (Language::Telugu, MoistureStatus::Unknown) => "తెలియదు",
        }
    }
}

impl PestRisk {
    pub fn as_str(&self) -> &'static str {
        match self {
            PestRisk::Low => "low",
            PestRisk::Medium => "medium",
            PestRisk::High => "high",
            PestRisk::Unknown => "unknown",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, PestRisk::Low) => "Low",
            (Language::English, PestRisk::Medium) => "Medium",
            (Language::English, PestRisk::High) => "High",
            (Language::English, PestRisk::Unknown) => "Unknown",
            (Language::Telugu, PestRisk::Low) => "తక్కువ",
            (Language::Telugu, PestRisk::Medium) => "మధ్యస్థ",
            (Language::Telugu, PestRisk::High) => "అధిక",
            (Language::Telugu, PestRisk::Unknown) => "తెలియని",
        }
    }
}

impl CropHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropHealth::Healthy => "healthy",
            CropHealth::Improving => "improving",
            CropHealth::Stress => "stress",
            CropHealth::Unknown => "unknown",
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match (language, self) {
            (Language::English, CropHealth::Healthy) => "Healthy",
            (Language::English, CropHealth::Improving) => "Improving",
            (Language::English, CropHealth::Stress) => "Under stress",
            (Language::English, CropHealth::Unknown) => "Unknown",
            (Language::Telugu, CropHealth::Healthy) => "ఆరోగ్యంగా ఉంది",
            (Language::Telugu, CropHealth::Improving) => "మెరుగుపడుతోంది",
            (Language::Telugu, CropHealth::Stress) => "ఒత్తిడిలో ఉంది",
            (Language::Telugu, CropHealth::Unknown) => "తెలియదు",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(NutrientStatus, PhStatus, MoistureStatus, PestRisk, CropHealth);

/// Raw classification of a snapshot, one status per quantity.
///
/// Unknown inputs stay `Unknown` here; nothing is defaulted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusReport {
    pub nitrogen: NutrientStatus,
    pub phosphorus: NutrientStatus,
    pub potassium: NutrientStatus,
    pub ph: PhStatus,
    pub moisture: MoistureStatus,
    pub pest_risk: PestRisk,
    pub crop_health: CropHealth,
}

impl StatusReport {
    /// Whether any of the three primary nutrients is low
    pub fn any_nutrient_low(&self) -> bool {
        [self.nitrogen, self.phosphorus, self.potassium].contains(&NutrientStatus::Low)
    }
}
