//! Farm status and advisory service

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use shared::advisory::ai::{build_advisory_prompt, parse_advisory_response};
use shared::{classify, describe, Advisory, FarmSnapshot, Language, SensorReading, StatusReport, Thresholds};

use super::readings::ReadingStore;
use super::snapshot::SnapshotMerger;
use crate::external::CompletionProvider;

/// How the advisory text is produced
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AdvisoryMode {
    /// Deterministic phrase tables
    #[default]
    Rules,
    /// Completion provider, rules on any failure
    Ai,
}

/// Snapshot with its categories and the names of still-unknown fields
#[derive(Debug, Clone, Serialize)]
pub struct FarmStatus {
    pub snapshot: FarmSnapshot,
    pub status: StatusReport,
    pub missing: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AdvisoryReport {
    pub snapshot: FarmSnapshot,
    pub status: StatusReport,
    pub advisory: Advisory,
}

/// Composes farm status and advisories from the stored reading and live providers
#[derive(Clone)]
pub struct AdvisoryService {
    readings: Arc<dyn ReadingStore>,
    merger: SnapshotMerger,
    completion: Option<Arc<dyn CompletionProvider>>,
    thresholds: Thresholds,
}

impl AdvisoryService {
    pub fn new(
        readings: Arc<dyn ReadingStore>,
        merger: SnapshotMerger,
        completion: Option<Arc<dyn CompletionProvider>>,
    ) -> Self {
        Self {
            readings,
            merger,
            completion,
            thresholds: Thresholds::default(),
        }
    }

    /// A store failure is treated like an empty table
    async fn stored_reading(&self) -> Option<SensorReading> {
        match self.readings.latest_reading().await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load latest reading; continuing without it");
                None
            }
        }
    }

    /// Merged snapshot for the current request
    pub async fn snapshot(&self) -> FarmSnapshot {
        let reading = self.stored_reading().await;
        self.merger.merge(reading).await
    }

    pub async fn status(&self) -> FarmStatus {
        let snapshot = self.snapshot().await;
        let status = classify(&snapshot, &self.thresholds);
        let missing = snapshot.missing_fields();
        FarmStatus {
            snapshot,
            status,
            missing,
        }
    }

    pub async fn advisory(&self, language: Language, mode: AdvisoryMode) -> AdvisoryReport {
        let snapshot = self.snapshot().await;
        let status = classify(&snapshot, &self.thresholds);

        let advisory = match mode {
            AdvisoryMode::Rules => describe(&snapshot, language, &self.thresholds),
            AdvisoryMode::Ai => self.ai_advisory(&snapshot, language).await,
        };

        AdvisoryReport {
            snapshot,
            status,
            advisory,
        }
    }

    /// Provider-written advisory; the rule composer answers whenever the
    /// provider is missing, fails or replies with nothing usable
    async fn ai_advisory(&self, snapshot: &FarmSnapshot, language: Language) -> Advisory {
        let Some(provider) = &self.completion else {
            tracing::debug!("No completion provider configured; using rule advisory");
            return describe(snapshot, language, &self.thresholds);
        };

        let prompt = build_advisory_prompt(&snapshot.values(), language);
        match provider.complete(&prompt).await {
            Ok(content) => {
                let inputs = snapshot.with_defaults();
                parse_advisory_response(&content, &inputs, language, &self.thresholds)
                    .unwrap_or_else(|| {
                        tracing::warn!("AI advisory reply unusable; using rule advisory");
                        describe(snapshot, language, &self.thresholds)
                    })
            }
            Err(e) => {
                tracing::warn!(error = %e, "AI advisory failed; using rule advisory");
                describe(snapshot, language, &self.thresholds)
            }
        }
    }
}
