use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument};
use validator::Validate;

use super::AppState;
use crate::core::data::normalize_prediction;
use crate::core::tiers::MortalityTier;
use crate::core::{assess, filter_cohort, summarize_cohort};
use crate::error::SaltguardError;
use crate::models::{CohortEntry, Vitals};

#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    #[serde(default)]
    pub patient_name: Option<String>,
    pub vitals: Vitals,
}

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub patient_name: Option<String>,
    pub vitals: Vitals,
    /// Raw prediction record; normalized before use.
    #[serde(default)]
    pub outcome: Value,
}

#[derive(Debug, Deserialize)]
pub struct CohortRequest {
    #[serde(default)]
    pub patients: Vec<CohortEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CohortFilter {
    pub risk: Option<String>,
    pub cardiac: Option<String>,
}

#[derive(Debug, Serialize)]
struct FilteredCohort<'a> {
    count: usize,
    patients: Vec<&'a CohortEntry>,
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "SALTGUARD triage API running" }))
}

/// Validates vitals, asks the prediction service for an outcome and returns
/// the full report. Prediction failures degrade to the neutral outcome.
#[instrument(skip(state, body))]
pub async fn assess_patient(
    state: web::Data<AppState>,
    body: web::Json<AssessRequest>,
) -> Result<HttpResponse, SaltguardError> {
    let AssessRequest { patient_name, vitals } = body.into_inner();
    vitals.validate()?;

    let outcome = state.predictor.predict_or_neutral(&vitals).await;
    let report = assess(patient_name, vitals, outcome);

    info!(
        assessment_id = %report.assessment_id,
        tier = %report.mortality_tier,
        flags = report.active_flags.len(),
        "assessment complete"
    );
    Ok(HttpResponse::Ok().json(report))
}

/// Rebuilds the report for an outcome the caller already has.
#[instrument(skip(body))]
pub async fn explain_outcome(body: web::Json<ExplainRequest>) -> Result<HttpResponse, SaltguardError> {
    let ExplainRequest {
        patient_name,
        vitals,
        outcome,
    } = body.into_inner();
    vitals.validate()?;

    let report = assess(patient_name, vitals, normalize_prediction(&outcome));
    Ok(HttpResponse::Ok().json(report))
}

#[instrument(skip(body), fields(patients = body.patients.len()))]
pub async fn cohort_summary(body: web::Json<CohortRequest>) -> HttpResponse {
    let summary = summarize_cohort(&body.patients);
    info!(
        total = summary.total,
        high = summary.mortality_high,
        cardiac_high = summary.cardiac_high,
        "cohort summarized"
    );
    HttpResponse::Ok().json(summary)
}

/// `?risk=high|moderate|low` and `?cardiac=high`. Unrecognized values are
/// ignored.
#[instrument(skip(body), fields(patients = body.patients.len()))]
pub async fn cohort_filter(
    query: web::Query<CohortFilter>,
    body: web::Json<CohortRequest>,
) -> HttpResponse {
    let risk = query.risk.as_deref().and_then(MortalityTier::from_filter);
    let cardiac_high_only = query
        .cardiac
        .as_deref()
        .map_or(false, |c| c.eq_ignore_ascii_case("high"));

    let patients = filter_cohort(&body.patients, risk, cardiac_high_only);
    HttpResponse::Ok().json(FilteredCohort {
        count: patients.len(),
        patients,
    })
}
