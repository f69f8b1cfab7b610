//! Assembles everything the patient detail view shows for one assessment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::explanation::{explain, Explanation};
use crate::core::tiers::{classify_mortality, CardiacReading, MortalityTier};
use crate::models::{ClinicalFlag, PredictionOutcome, Vitals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CareSetting {
    #[serde(rename = "ICU")]
    Icu,
    Monitor,
}

impl From<MortalityTier> for CareSetting {
    fn from(tier: MortalityTier) -> Self {
        match tier {
            MortalityTier::High => CareSetting::Icu,
            MortalityTier::Moderate | MortalityTier::Low => CareSetting::Monitor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveFlag {
    pub flag: ClinicalFlag,
    pub label: String,
    pub description: String,
}

impl From<ClinicalFlag> for ActiveFlag {
    fn from(flag: ClinicalFlag) -> Self {
        Self {
            flag,
            label: flag.label().to_string(),
            description: flag.description().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessment_id: Uuid,
    pub assessed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    pub vitals: Vitals,
    pub outcome: PredictionOutcome,
    pub mortality_tier: MortalityTier,
    pub mortality_label: String,
    pub mortality_color: String,
    pub cardiac: CardiacReading,
    pub care_setting: CareSetting,
    pub alert: Option<String>,
    pub active_flags: Vec<ActiveFlag>,
    pub warning_summary: String,
    pub explanation: Explanation,
}

/// Builds the report for a vitals/outcome pair.
///
/// A zero shock index from the service is treated as missing and, when the
/// vitals carry heart rate and systolic pressure, derived from them.
pub fn assess(patient_name: Option<String>, vitals: Vitals, mut outcome: PredictionOutcome) -> AssessmentReport {
    if outcome.shock_index <= 0.0 {
        if let Some(derived) = vitals.shock_index() {
            outcome.shock_index = derived;
        }
    }

    let mortality_tier = classify_mortality(outcome.mortality_probability);
    let cardiac = CardiacReading::new(
        Some(outcome.heart_risk_score).filter(|score| *score > 0.0),
        Some(outcome.shock_index).filter(|si| *si > 0.0),
        Some(outcome.heart_risk_label.as_str()),
    );
    let explanation = explain(
        &outcome.clinical_flags,
        &vitals,
        outcome.shock_index,
        mortality_tier,
        &outcome.heart_risk_label,
    );

    AssessmentReport {
        assessment_id: Uuid::new_v4(),
        assessed_at: Utc::now(),
        patient_name,
        mortality_tier,
        mortality_label: mortality_tier.label().to_string(),
        mortality_color: mortality_tier.color().to_string(),
        cardiac,
        care_setting: CareSetting::from(mortality_tier),
        alert: mortality_tier.alert_banner().map(str::to_string),
        active_flags: outcome
            .clinical_flags
            .active()
            .into_iter()
            .map(ActiveFlag::from)
            .collect(),
        warning_summary: outcome.clinical_flags.warning_summary(),
        explanation,
        vitals,
        outcome,
    }
}
