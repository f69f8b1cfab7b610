use actix_web::web;

use super::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health)).service(
        web::scope("/api/v1")
            .route("/assess", web::post().to(handlers::assess_patient))
            .route("/explain", web::post().to(handlers::explain_outcome))
            .route("/cohort/summary", web::post().to(handlers::cohort_summary))
            .route("/cohort/filter", web::post().to(handlers::cohort_filter)),
    );
}
