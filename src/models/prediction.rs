use serde::{Deserialize, Serialize};

use crate::core::data::{lenient_label, lenient_number};

/// Clinical flags as reported by the prediction service. Treated as ground
/// truth; never recomputed from vitals here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSet {
    pub renal_dysfunction: bool,
    pub hyponatremia: bool,
    pub severe_anemia: bool,
    pub leukocytosis: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClinicalFlag {
    RenalDysfunction,
    Hyponatremia,
    SevereAnemia,
    Leukocytosis,
}

impl ClinicalFlag {
    pub const ALL: [ClinicalFlag; 4] = [
        ClinicalFlag::RenalDysfunction,
        ClinicalFlag::Hyponatremia,
        ClinicalFlag::SevereAnemia,
        ClinicalFlag::Leukocytosis,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClinicalFlag::RenalDysfunction => "Renal Dysfunction",
            ClinicalFlag::Hyponatremia => "Hyponatremia",
            ClinicalFlag::SevereAnemia => "Severe Anemia",
            ClinicalFlag::Leukocytosis => "Leukocytosis",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ClinicalFlag::RenalDysfunction => "Elevated creatinine indicating kidney impairment",
            ClinicalFlag::Hyponatremia => "Low sodium levels in the blood",
            ClinicalFlag::SevereAnemia => "Critically low hemoglobin levels",
            ClinicalFlag::Leukocytosis => "Elevated white blood cell count",
        }
    }
}

impl FlagSet {
    pub fn is_set(&self, flag: ClinicalFlag) -> bool {
        match flag {
            ClinicalFlag::RenalDysfunction => self.renal_dysfunction,
            ClinicalFlag::Hyponatremia => self.hyponatremia,
            ClinicalFlag::SevereAnemia => self.severe_anemia,
            ClinicalFlag::Leukocytosis => self.leukocytosis,
        }
    }

    /// Active flags in panel order.
    pub fn active(&self) -> Vec<ClinicalFlag> {
        ClinicalFlag::ALL
            .into_iter()
            .filter(|flag| self.is_set(*flag))
            .collect()
    }

    /// Header line for the warning panel.
    pub fn warning_summary(&self) -> String {
        match self.active().len() {
            0 => "No critical warnings detected".to_string(),
            1 => "1 clinical warning detected".to_string(),
            n => format!("{} clinical warnings detected", n),
        }
    }
}

/// Result returned by the external prediction service, after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    /// Percent, nominally 0-100. Not clamped.
    pub mortality_probability: f64,
    /// The service's own text label. Display only, never used for tiering.
    pub mortality_risk: String,
    /// Nominally 0-10; 0 means the service did not compute one.
    pub heart_risk_score: f64,
    #[serde(rename = "heart_risk")]
    pub heart_risk_label: String,
    pub heart_risk_reasons: Vec<String>,
    pub shock_index: f64,
    pub clinical_flags: FlagSet,
}

pub const UNKNOWN_LABEL: &str = "Unknown";

impl PredictionOutcome {
    /// Substituted when the prediction call fails.
    pub fn neutral() -> Self {
        Self {
            mortality_probability: 0.0,
            mortality_risk: UNKNOWN_LABEL.to_string(),
            heart_risk_score: 0.0,
            heart_risk_label: UNKNOWN_LABEL.to_string(),
            heart_risk_reasons: Vec::new(),
            shock_index: 0.0,
            clinical_flags: FlagSet::default(),
        }
    }

    pub fn cohort_outcome(&self) -> CohortOutcome {
        CohortOutcome {
            probability: self.mortality_probability,
            cardiac_score: self.heart_risk_score,
            cardiac_label: self.heart_risk_label.clone(),
        }
    }
}

fn unknown_label() -> String {
    UNKNOWN_LABEL.to_string()
}

/// The slice of an outcome the population view needs. Stored rows may carry
/// nulls or strings; they are read the same way as a prediction response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortOutcome {
    #[serde(default, alias = "mortality_probability", deserialize_with = "lenient_number")]
    pub probability: f64,
    #[serde(default, alias = "heart_risk_score", deserialize_with = "lenient_number")]
    pub cardiac_score: f64,
    #[serde(default = "unknown_label", alias = "heart_risk", deserialize_with = "lenient_label")]
    pub cardiac_label: String,
}
