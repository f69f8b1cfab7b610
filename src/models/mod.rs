//! Data models for patients, vitals and prediction outcomes.

pub mod patient;
pub mod prediction;

pub use patient::{CohortEntry, Vitals};
pub use prediction::{ClinicalFlag, CohortOutcome, FlagSet, PredictionOutcome};
