//! Business logic services for the Smart Agri Advisory platform

pub mod advisory;
pub mod readings;
pub mod recommendation;
pub mod snapshot;

pub use advisory::{AdvisoryMode, AdvisoryReport, AdvisoryService, FarmStatus};
pub use readings::ReadingService;
pub use recommendation::RecommendationService;
pub use snapshot::{MergeSettings, SnapshotMerger};
