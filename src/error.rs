//! Error type for the service boundary. The triage core itself is total and
//! never returns these.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaltguardError {
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("invalid prediction service url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid vitals: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("prediction request failed: {0}")]
    Prediction(#[from] reqwest::Error),

    #[error("prediction service returned status {0}")]
    PredictionStatus(u16),

    #[error("malformed prediction response: {0}")]
    MalformedPrediction(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SaltguardError>;

impl ResponseError for SaltguardError {
    fn status_code(&self) -> StatusCode {
        match self {
            SaltguardError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            SaltguardError::Validation(errors) => json!({
                "error": "invalid vitals",
                "details": errors,
            }),
            other => json!({ "error": other.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
