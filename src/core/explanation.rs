//! Narrative and recommendation text for the patient detail view.

use serde::{Deserialize, Serialize};

use crate::core::tiers::{is_critical_shock, MortalityTier};
use crate::models::{FlagSet, Vitals};

pub const HYPOTENSION_SYSTOLIC_THRESHOLD: f64 = 90.0;
pub const BILIRUBIN_THRESHOLD: f64 = 2.0;
pub const INR_THRESHOLD: f64 = 1.5;

pub const REASSURANCE: &str = "The patient's clinical parameters are within acceptable ranges. \
Continue routine monitoring and follow standard care protocols.";

pub const FALLBACK_RECOMMENDATIONS: [&str; 2] = [
    "Continue standard monitoring protocols",
    "Schedule follow-up assessment in 24-48 hours",
];

const RENAL_RECOMMENDATION: &str = "Monitor renal function closely; consider nephrology consult";
const SODIUM_RECOMMENDATION: &str = "Evaluate sodium correction strategy; monitor fluid balance";
const ANEMIA_RECOMMENDATION: &str = "Consider blood transfusion if symptomatic; investigate cause";
const SEPSIS_RECOMMENDATION: &str =
    "Screen for infection; consider broad-spectrum antibiotics if sepsis suspected";
const SHOCK_RECOMMENDATION: &str =
    "Initiate fluid resuscitation; prepare for potential vasopressor support";
const HYPOTENSION_RECOMMENDATION: &str = "Address hypotension immediately; consider ICU admission";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub narrative: String,
    pub recommendations: Vec<String>,
}

fn is_hypotensive(vitals: &Vitals) -> bool {
    vitals
        .systolic_bp
        .map_or(false, |sbp| sbp < HYPOTENSION_SYSTOLIC_THRESHOLD)
}

/// Reason clauses in fixed priority order.
fn reasons(flags: &FlagSet, vitals: &Vitals, shock_index: f64) -> Vec<String> {
    let mut reasons = Vec::new();

    if flags.hyponatremia {
        reasons.push(format!("low sodium level ({} mEq/L)", vitals.sodium));
    }
    if flags.renal_dysfunction {
        reasons.push(format!(
            "kidney dysfunction (creatinine: {} mg/dL, BUN: {} mg/dL)",
            vitals.creatinine, vitals.bun
        ));
    }
    if flags.severe_anemia {
        reasons.push(format!("severe anemia (hemoglobin: {} g/dL)", vitals.hemoglobin));
    }
    if flags.leukocytosis {
        reasons.push(format!(
            "elevated white blood cell count ({} ×10³/µL)",
            vitals.wbc
        ));
    }
    if let Some(sbp) = vitals
        .systolic_bp
        .filter(|sbp| *sbp < HYPOTENSION_SYSTOLIC_THRESHOLD)
    {
        reasons.push(format!("low blood pressure ({} mmHg)", sbp));
    }
    if is_critical_shock(shock_index) {
        reasons.push(format!("critical shock index ({:.2})", shock_index));
    }
    if let Some(bilirubin) = vitals.bilirubin.filter(|b| *b > BILIRUBIN_THRESHOLD) {
        reasons.push(format!("elevated bilirubin ({} mg/dL)", bilirubin));
    }
    if let Some(inr) = vitals.inr.filter(|i| *i > INR_THRESHOLD) {
        reasons.push(format!("prolonged INR ({})", inr));
    }

    reasons
}

/// One recommendation per active condition. Derived separately from the
/// narrative clauses; the two lists do not line up one to one.
fn recommendations(flags: &FlagSet, vitals: &Vitals, shock_index: f64) -> Vec<String> {
    let triggered = [
        (flags.renal_dysfunction, RENAL_RECOMMENDATION),
        (flags.hyponatremia, SODIUM_RECOMMENDATION),
        (flags.severe_anemia, ANEMIA_RECOMMENDATION),
        (flags.leukocytosis, SEPSIS_RECOMMENDATION),
        (is_critical_shock(shock_index), SHOCK_RECOMMENDATION),
        (is_hypotensive(vitals), HYPOTENSION_RECOMMENDATION),
    ];

    let list: Vec<String> = triggered
        .iter()
        .filter(|(active, _)| *active)
        .map(|(_, text)| text.to_string())
        .collect();

    if list.is_empty() {
        FALLBACK_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
    } else {
        list
    }
}

/// Builds the explanation shown beside a patient's risk scores.
///
/// `cardiac_label` is compared exactly against `"High"`; any other label
/// yields the softer cardiac phrase.
pub fn explain(
    flags: &FlagSet,
    vitals: &Vitals,
    shock_index: f64,
    mortality_tier: MortalityTier,
    cardiac_label: &str,
) -> Explanation {
    let reasons = reasons(flags, vitals, shock_index);

    let narrative = if reasons.is_empty() {
        REASSURANCE.to_string()
    } else {
        let risk_phrase = if mortality_tier == MortalityTier::High {
            "high mortality"
        } else {
            "elevated"
        };
        let cardiac_phrase = if cardiac_label == "High" {
            "increased heart attack risk"
        } else {
            "cardiac concerns"
        };
        format!(
            "This patient presents with {}, which collectively contribute to {} risk and {}. \
             Immediate clinical attention is recommended.",
            reasons.join(", "),
            risk_phrase,
            cardiac_phrase
        )
    };

    Explanation {
        narrative,
        recommendations: recommendations(flags, vitals, shock_index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vitals() -> Vitals {
        Vitals {
            age: 67.0,
            sodium: 132.0,
            creatinine: 2.1,
            bun: 38.0,
            hemoglobin: 8.4,
            wbc: 14.2,
            bilirubin: None,
            inr: None,
            platelet_count: None,
            systolic_bp: Some(110.0),
            heart_rate: Some(80.0),
        }
    }

    #[test]
    fn quiet_patient_gets_reassurance() {
        let explanation = explain(&FlagSet::default(), &vitals(), 0.5, MortalityTier::Low, "Low");
        assert_eq!(explanation.narrative, REASSURANCE);
        assert_eq!(
            explanation.recommendations,
            vec![
                "Continue standard monitoring protocols".to_string(),
                "Schedule follow-up assessment in 24-48 hours".to_string(),
            ]
        );
    }

    #[test]
    fn sodium_clause_precedes_wbc_clause() {
        let flags = FlagSet {
            leukocytosis: true,
            hyponatremia: true,
            ..FlagSet::default()
        };
        let explanation = explain(&flags, &vitals(), 0.5, MortalityTier::Moderate, "Moderate");
        let sodium = explanation.narrative.find("low sodium level (132 mEq/L)").unwrap();
        let wbc = explanation
            .narrative
            .find("elevated white blood cell count (14.2 ×10³/µL)")
            .unwrap();
        assert!(sodium < wbc);
    }

    #[test]
    fn full_narrative_wording() {
        let flags = FlagSet {
            hyponatremia: true,
            renal_dysfunction: true,
            ..FlagSet::default()
        };
        let explanation = explain(&flags, &vitals(), 0.5, MortalityTier::High, "High");
        assert_eq!(
            explanation.narrative,
            "This patient presents with low sodium level (132 mEq/L), kidney dysfunction \
             (creatinine: 2.1 mg/dL, BUN: 38 mg/dL), which collectively contribute to high \
             mortality risk and increased heart attack risk. Immediate clinical attention is \
             recommended."
        );
        assert_eq!(
            explanation.recommendations,
            vec![RENAL_RECOMMENDATION.to_string(), SODIUM_RECOMMENDATION.to_string()]
        );
    }

    #[test]
    fn non_high_tiers_use_soft_phrases() {
        let flags = FlagSet {
            severe_anemia: true,
            ..FlagSet::default()
        };
        let explanation = explain(&flags, &vitals(), 0.5, MortalityTier::Moderate, "High Risk");
        assert!(explanation
            .narrative
            .ends_with("contribute to elevated risk and cardiac concerns. Immediate clinical attention is recommended."));
    }

    #[test]
    fn vitals_only_clauses_fire_without_flags() {
        let mut v = vitals();
        v.systolic_bp = Some(82.0);
        v.bilirubin = Some(3.4);
        v.inr = Some(1.8);
        let explanation = explain(&FlagSet::default(), &v, 1.234, MortalityTier::Low, "Low");

        assert!(explanation.narrative.contains(
            "low blood pressure (82 mmHg), critical shock index (1.23), \
             elevated bilirubin (3.4 mg/dL), prolonged INR (1.8)"
        ));
        assert_eq!(
            explanation.recommendations,
            vec![SHOCK_RECOMMENDATION.to_string(), HYPOTENSION_RECOMMENDATION.to_string()]
        );
    }

    #[test]
    fn lab_only_clauses_keep_fallback_recommendations() {
        let mut v = vitals();
        v.bilirubin = Some(2.5);
        let explanation = explain(&FlagSet::default(), &v, 0.5, MortalityTier::Low, "Low");

        assert!(explanation.narrative.starts_with("This patient presents with elevated bilirubin"));
        assert_eq!(explanation.recommendations.len(), 2);
        assert_eq!(explanation.recommendations[0], FALLBACK_RECOMMENDATIONS[0]);
    }

    #[test]
    fn missing_optional_vitals_never_trigger() {
        let mut v = vitals();
        v.systolic_bp = None;
        let explanation = explain(&FlagSet::default(), &v, 0.0, MortalityTier::Low, "Low");
        assert_eq!(explanation.narrative, REASSURANCE);
    }

    #[test]
    fn thresholds_are_strict() {
        let mut v = vitals();
        v.systolic_bp = Some(90.0);
        v.bilirubin = Some(2.0);
        v.inr = Some(1.5);
        let explanation = explain(&FlagSet::default(), &v, 1.0, MortalityTier::Low, "Low");
        assert_eq!(explanation.narrative, REASSURANCE);
    }

    #[test]
    fn explain_is_idempotent() {
        let flags = FlagSet {
            renal_dysfunction: true,
            leukocytosis: true,
            ..FlagSet::default()
        };
        let first = explain(&flags, &vitals(), 1.1, MortalityTier::High, "High");
        let second = explain(&flags, &vitals(), 1.1, MortalityTier::High, "High");
        assert_eq!(first, second);
    }
}
