//! Cohort-level aggregation and filtering.

use serde::{Deserialize, Serialize};

use crate::core::tiers::{classify_mortality, is_cardiac_alert, MortalityTier};
use crate::models::{CohortEntry, CohortOutcome};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub total: usize,
    pub mortality_high: usize,
    pub mortality_moderate: usize,
    pub mortality_low: usize,
    pub cardiac_high: usize,
}

impl PopulationSummary {
    /// Patients that have at least one outcome.
    pub fn assessed(&self) -> usize {
        self.mortality_high + self.mortality_moderate + self.mortality_low
    }

    fn record(&mut self, outcome: Option<&CohortOutcome>) {
        self.total += 1;
        let Some(outcome) = outcome else {
            return;
        };

        match classify_mortality(outcome.probability) {
            MortalityTier::High => self.mortality_high += 1,
            MortalityTier::Moderate => self.mortality_moderate += 1,
            MortalityTier::Low => self.mortality_low += 1,
        }
        if is_cardiac_alert(outcome.cardiac_score, &outcome.cardiac_label) {
            self.cardiac_high += 1;
        }
    }
}

/// Tier counts over a cohort. Each item is one patient's most recent
/// outcome, or `None` if the patient has not been assessed; those still count
/// toward `total`.
pub fn summarize<'a, I>(outcomes: I) -> PopulationSummary
where
    I: IntoIterator<Item = Option<&'a CohortOutcome>>,
{
    outcomes
        .into_iter()
        .fold(PopulationSummary::default(), |mut summary, outcome| {
            summary.record(outcome);
            summary
        })
}

pub fn summarize_cohort(entries: &[CohortEntry]) -> PopulationSummary {
    summarize(entries.iter().map(|entry| entry.outcome.as_ref()))
}

/// Cohort list filtering for the drill-down links on the summary cards.
///
/// With no filter every entry is returned. Once any filter is active,
/// unassessed patients are dropped. Input order is preserved.
pub fn filter_cohort(
    entries: &[CohortEntry],
    risk: Option<MortalityTier>,
    cardiac_high_only: bool,
) -> Vec<&CohortEntry> {
    if risk.is_none() && !cardiac_high_only {
        return entries.iter().collect();
    }

    entries
        .iter()
        .filter(|entry| {
            let Some(outcome) = entry.outcome.as_ref() else {
                return false;
            };
            if let Some(tier) = risk {
                if classify_mortality(outcome.probability) != tier {
                    return false;
                }
            }
            !cardiac_high_only || is_cardiac_alert(outcome.cardiac_score, &outcome.cardiac_label)
        })
        .collect()
}
