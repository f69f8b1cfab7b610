//! Tier classification for mortality probability and cardiac risk.
//!
//! Every tier boundary in the crate lives here. The detail and cohort views
//! use different cardiac thresholds; they are kept as two named constants
//! because merging them would change which patients the cohort view counts.

use serde::{Deserialize, Serialize};

/// Probability (percent) above which mortality is High.
pub const MORTALITY_HIGH_THRESHOLD: f64 = 60.0;
/// Probability (percent) at or above which mortality is at least Moderate.
pub const MORTALITY_MODERATE_THRESHOLD: f64 = 20.0;

/// Per-patient cardiac score above which the detail view shows High.
pub const CARDIAC_HIGH_THRESHOLD_DETAIL: f64 = 4.0;
/// Cardiac score above which a patient counts toward the cohort alert total.
pub const CARDIAC_ALERT_THRESHOLD_COHORT: f64 = 5.0;

/// Shock index above which the cardiac fallback is High.
pub const SHOCK_INDEX_DISPLAY_THRESHOLD: f64 = 0.8;
/// Shock index above which the explanation reports critical shock.
pub const SHOCK_INDEX_CRITICAL_THRESHOLD: f64 = 1.0;

pub const DEFAULT_CARDIAC_LABEL: &str = "Low";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MortalityTier {
    Low,
    Moderate,
    High,
}

impl MortalityTier {
    pub fn label(&self) -> &'static str {
        match self {
            MortalityTier::Low => "Low Risk",
            MortalityTier::Moderate => "Moderate Risk",
            MortalityTier::High => "High Risk",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MortalityTier::Low => "green",
            MortalityTier::Moderate => "amber",
            MortalityTier::High => "red",
        }
    }

    /// Banner shown above the patient detail, if any.
    pub fn alert_banner(&self) -> Option<&'static str> {
        match self {
            MortalityTier::High => Some("Action Required: High Risk Patient"),
            MortalityTier::Moderate => Some("Warning: Moderate Risk Detected"),
            MortalityTier::Low => None,
        }
    }

    /// Parses a cohort filter value such as `high` or `Moderate`.
    pub fn from_filter(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(MortalityTier::High),
            "moderate" => Some(MortalityTier::Moderate),
            "low" => Some(MortalityTier::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for MortalityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardiacTier {
    Low,
    Moderate,
    High,
}

/// Cardiac tier together with the raw inputs it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardiacReading {
    pub tier: CardiacTier,
    pub label: String,
    pub score: Option<f64>,
    pub shock_index: Option<f64>,
}

impl CardiacReading {
    pub fn new(score: Option<f64>, shock_index: Option<f64>, label: Option<&str>) -> Self {
        let label = display_cardiac_label(label);
        Self {
            tier: classify_cardiac(score, shock_index, &label),
            label,
            score,
            shock_index,
        }
    }
}

/// Mortality tier for a probability in percent.
///
/// Callers normalize missing values to `0.0` first, so an absent probability
/// lands in `Low`. NaN also falls through to `Low`.
pub fn classify_mortality(probability: f64) -> MortalityTier {
    if probability > MORTALITY_HIGH_THRESHOLD {
        MortalityTier::High
    } else if probability >= MORTALITY_MODERATE_THRESHOLD {
        MortalityTier::Moderate
    } else {
        MortalityTier::Low
    }
}

/// Per-patient cardiac tier.
///
/// A positive score decides the tier. With no score the shock index is used,
/// and that fallback has only two bands: above the display threshold is High,
/// everything else is Low. The label is carried for display and does not
/// affect the tier.
pub fn classify_cardiac(score: Option<f64>, shock_index: Option<f64>, _label: &str) -> CardiacTier {
    match score {
        Some(score) if score > 0.0 => {
            if score > CARDIAC_HIGH_THRESHOLD_DETAIL {
                CardiacTier::High
            } else {
                CardiacTier::Moderate
            }
        }
        _ => match shock_index {
            Some(si) if si > SHOCK_INDEX_DISPLAY_THRESHOLD => CardiacTier::High,
            _ => CardiacTier::Low,
        },
    }
}

/// Coarse cohort predicate: label mentions "High" or the score clears the
/// cohort threshold. Independent of [`CARDIAC_HIGH_THRESHOLD_DETAIL`].
pub fn is_cardiac_alert(score: f64, label: &str) -> bool {
    label.contains("High") || score > CARDIAC_ALERT_THRESHOLD_COHORT
}

pub fn is_critical_shock(shock_index: f64) -> bool {
    shock_index > SHOCK_INDEX_CRITICAL_THRESHOLD
}

pub fn display_cardiac_label(label: Option<&str>) -> String {
    match label.map(str::trim) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => DEFAULT_CARDIAC_LABEL.to_string(),
    }
}
