use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::PredictionConfig;
use crate::core::data::process_prediction_data;
use crate::error::{Result, SaltguardError};
use crate::models::{PredictionOutcome, Vitals};

/// Fields the prediction model is trained on.
#[derive(Debug, Serialize)]
struct PredictionRequest {
    age: f64,
    sodium: f64,
    creatinine: f64,
    hemoglobin: f64,
    wbc: f64,
    bun: f64,
}

impl From<&Vitals> for PredictionRequest {
    fn from(vitals: &Vitals) -> Self {
        Self {
            age: vitals.age,
            sodium: vitals.sodium,
            creatinine: vitals.creatinine,
            hemoglobin: vitals.hemoglobin,
            wbc: vitals.wbc,
            bun: vitals.bun,
        }
    }
}

/// Client for the external mortality prediction service.
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    endpoint: Url,
}

impl PredictionClient {
    pub fn new(config: &PredictionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let endpoint = config.endpoint()?;

        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Calls the service and normalizes whatever comes back.
    #[instrument(skip(self, vitals), fields(endpoint = %self.endpoint))]
    pub async fn predict(&self, vitals: &Vitals) -> Result<PredictionOutcome> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&PredictionRequest::from(vitals))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SaltguardError::PredictionStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let outcome = process_prediction_data(&body)?;
        debug!(
            probability = outcome.mortality_probability,
            heart_risk = %outcome.heart_risk_label,
            "prediction received"
        );
        Ok(outcome)
    }

    /// Like [`predict`](Self::predict), but any failure yields the neutral
    /// outcome instead of an error.
    pub async fn predict_or_neutral(&self, vitals: &Vitals) -> PredictionOutcome {
        match self.predict(vitals).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "prediction service failed, using neutral outcome");
                PredictionOutcome::neutral()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn vitals() -> Vitals {
        Vitals {
            age: 72.0,
            sodium: 128.0,
            creatinine: 2.3,
            bun: 45.0,
            hemoglobin: 8.1,
            wbc: 13.0,
            bilirubin: None,
            inr: None,
            platelet_count: None,
            systolic_bp: Some(85.0),
            heart_rate: Some(110.0),
        }
    }

    fn client_for(server: &MockServer, timeout_secs: u64) -> PredictionClient {
        PredictionClient::new(&PredictionConfig {
            base_url: server.uri(),
            timeout_secs,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn posts_model_features_and_normalizes_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(json!({
                "age": 72.0,
                "sodium": 128.0,
                "creatinine": 2.3,
                "hemoglobin": 8.1,
                "wbc": 13.0,
                "bun": 45.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "mortality_risk": "Very High Risk",
                "mortality_probability": 81.2,
                "heart_risk": "High",
                "heart_risk_score": 4,
                "clinical_flags": { "renal_dysfunction": true, "hyponatremia": true }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server, 5).predict(&vitals()).await.unwrap();
        assert_eq!(outcome.mortality_probability, 81.2);
        assert_eq!(outcome.heart_risk_label, "High");
        assert!(outcome.clinical_flags.renal_dysfunction);
        assert!(!outcome.clinical_flags.severe_anemia);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client_for(&server, 5).predict(&vitals()).await.unwrap_err();
        assert!(matches!(err, SaltguardError::PredictionStatus(503)));
    }

    #[tokio::test]
    async fn failures_fall_back_to_neutral() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server, 5).predict_or_neutral(&vitals()).await;
        assert_eq!(outcome, PredictionOutcome::neutral());
    }

    #[tokio::test]
    async fn slow_service_times_out_to_neutral() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "mortality_probability": 90.0 }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let outcome = client_for(&server, 1).predict_or_neutral(&vitals()).await;
        assert_eq!(outcome.mortality_probability, 0.0);
    }
}
