//! API module for the SaltGuard triage service
//!
//! HTTP surface over the triage core. Handlers hold no patient data between
//! requests; cohort endpoints work on whatever list the caller sends.

pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::core::ai::PredictionClient;

pub use routes::configure;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub predictor: PredictionClient,
}
