//! HTTP handlers for the Smart Agri Advisory API

mod farm;
mod health;
mod providers;
mod readings;
mod recommendation;

pub use farm::*;
pub use health::*;
pub use providers::*;
pub use readings::*;
pub use recommendation::*;
