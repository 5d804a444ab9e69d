//! Core data models for the fairness engine.

mod ids;
mod matchup;
mod report;
mod stats;
mod weights;

pub use ids::*;
pub use matchup::*;
pub use report::*;
pub use stats::*;
pub use weights::*;
