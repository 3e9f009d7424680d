//! Domain models for the Smart Agri Advisory platform

mod advisory;
mod reading;
mod recommendation;
mod snapshot;
mod status;

pub use advisory::*;
pub use reading::*;
pub use recommendation::*;
pub use snapshot::*;
pub use status::*;
