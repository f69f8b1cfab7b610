use serde::{Deserialize, Serialize};
use validator::Validate;

use super::prediction::CohortOutcome;
use crate::core::data::lenient_text;

/// Vital signs and labs captured for one assessment.
///
/// The ranges below are plausibility bounds checked once at the input
/// boundary; nothing downstream re-validates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Vitals {
    #[validate(range(min = 0.0, max = 120.0))]
    pub age: f64,
    /// mEq/L
    #[validate(range(min = 100.0, max = 180.0))]
    pub sodium: f64,
    /// mg/dL
    #[validate(range(min = 0.0, max = 20.0))]
    pub creatinine: f64,
    /// mg/dL
    #[validate(range(min = 0.0, max = 200.0))]
    pub bun: f64,
    /// g/dL
    #[validate(range(min = 0.0, max = 25.0))]
    pub hemoglobin: f64,
    /// ×10³/µL
    #[validate(range(min = 0.0, max = 100.0))]
    pub wbc: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 50.0))]
    pub bilirubin: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 20.0))]
    pub inr: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 0.0, max = 2000.0))]
    pub platelet_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 40.0, max = 300.0))]
    pub systolic_bp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 20.0, max = 300.0))]
    pub heart_rate: Option<f64>,
}

impl Vitals {
    /// Heart rate divided by systolic pressure, when both are known.
    pub fn shock_index(&self) -> Option<f64> {
        match (self.heart_rate, self.systolic_bp) {
            (Some(hr), Some(sbp)) if sbp > 0.0 => Some(hr / sbp),
            _ => None,
        }
    }
}

/// One row of the cohort list: a patient and their most recent outcome, if
/// any assessment has been run yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortEntry {
    pub patient_id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub patient_name: String,
    #[serde(default)]
    pub outcome: Option<CohortOutcome>,
}
