//! Triage core: tiering, cohort aggregation and explanations, plus the
//! prediction-service boundary that feeds them.
//!
//! `tiers`, `population` and `explanation` are pure and synchronous.
//! `ai` is the only module here that performs I/O.

pub mod ai;
pub mod assessment;
pub mod data;
pub mod explanation;
pub mod population;
pub mod tiers;

pub use assessment::{assess, AssessmentReport, CareSetting};
pub use explanation::{explain, Explanation};
pub use population::{filter_cohort, summarize, summarize_cohort, PopulationSummary};
pub use tiers::{classify_cardiac, classify_mortality, CardiacReading, CardiacTier, MortalityTier};
