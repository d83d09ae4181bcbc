use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
/// Service banner with the endpoint map, useful when poking the API by hand.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "service": "resumeforge-api",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "GET /api/health",
            "optimize": "POST /api/optimize",
            "validateResume": "POST /api/validate-resume",
            "sampleResume": "GET /api/sample-resume",
            "parseResume": "POST /api/parse-resume",
            "exportPdf": "POST /api/export-pdf"
        }
    }))
}

/// GET /api/health
/// Returns service status plus a live connectivity probe of the configured
/// AI provider (one-token completion; adds latency but catches dead
/// endpoints before users hit /api/parse-resume).
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let ai_status = state.ai.check().await;
    let ai_ready = ai_status.success;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
        "aiProvider": ai_status,
        "features": {
            "optimization": true,
            "validation": true,
            "aiParsing": ai_ready,
            "pdfExport": true
        }
    }))
}
