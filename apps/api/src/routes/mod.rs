pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handle_export_pdf;
use crate::optimize::handlers::handle_optimize;
use crate::providers::handlers::handle_parse_resume;
use crate::state::AppState;
use crate::validation::handlers::{handle_sample_resume, handle_validate_resume};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root_handler))
        .route("/api/health", get(health::health_handler))
        // Optimization API
        .route("/api/optimize", post(handle_optimize))
        // Validation API
        .route("/api/validate-resume", post(handle_validate_resume))
        .route("/api/sample-resume", get(handle_sample_resume))
        // Parsing API (AI-backed)
        .route("/api/parse-resume", post(handle_parse_resume))
        // Export API
        .route("/api/export-pdf", post(handle_export_pdf))
        .with_state(state)
}
