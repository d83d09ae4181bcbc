//! Axum route handler for the optimization API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::optimize::pipeline::{optimize, OptimizationOutcome};
use crate::state::AppState;
use crate::validation::{validate_job_description, validate_resume};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    pub resume_data: Value,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: OptimizationOutcome,
}

/// POST /api/optimize
///
/// Validates the resume and job description, then runs the full pipeline.
/// An empty job description is rejected outright; a non-empty one with no
/// extractable keywords returns the unchanged-resume result (equal scores,
/// original order) rather than an error.
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(request): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let jd_report = validate_job_description(&request.job_description);
    if !jd_report.valid {
        return Err(AppError::Validation(
            jd_report
                .errors
                .first()
                .cloned()
                .unwrap_or_else(|| "Invalid job description".to_string()),
        ));
    }

    let report = validate_resume(&request.resume_data);
    if !report.valid {
        return Err(AppError::InvalidResume(report));
    }

    let resume: Resume = serde_json::from_value(request.resume_data)
        .map_err(|e| AppError::Validation(format!("Malformed resume: {e}")))?;

    let outcome = optimize(&resume, &request.job_description, &state.patterns);

    info!(
        default_score = outcome.default_score,
        optimized_score = outcome.optimized_score,
        keywords = outcome.keywords.len(),
        "optimization complete"
    );

    Ok(Json(OptimizeResponse {
        success: true,
        outcome,
    }))
}
