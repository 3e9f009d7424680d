//! Common types used across the platform

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// GPS coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GpsCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsCoordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Bounding box of `offset` degrees around the point as
    /// `[min_lon, min_lat, max_lon, max_lat]`
    pub fn bounding_box(&self, offset: f64) -> [f64; 4] {
        [
            self.longitude - offset,
            self.latitude - offset,
            self.longitude + offset,
            self.latitude + offset,
        ]
    }
}

/// Supported advisory languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "te")]
    Telugu,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Telugu];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Telugu => "te",
        }
    }

    /// Language name as it is written into completion prompts
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Telugu => "Telugu",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "te" | "telugu" => Ok(Language::Telugu),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
