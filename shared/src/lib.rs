//! Shared types and advisory logic for the Smart Agri Advisory platform
//!
//! This crate contains the pure domain code shared between the backend,
//! the browser (via WASM), and other components of the system: farm
//! snapshots, threshold classification, localized advisory composition and
//! crop/soil recommendation parsing.

pub mod advisory;
pub mod classifier;
pub mod models;
pub mod recommendation;
pub mod types;
pub mod validation;

pub use advisory::{compose, describe};
pub use classifier::*;
pub use models::*;
pub use recommendation::*;
pub use types::*;
pub use validation::*;
