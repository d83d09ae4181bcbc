//! Axum route handlers for validation and the sample resume.

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::validation::ValidationReport;
use crate::validation::validate_resume;

/// Anonymized sample resume shipped with the binary.
const SAMPLE_RESUME: &str = include_str!("../../data/sample_resume.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResumeRequest {
    pub resume_data: Value,
}

/// POST /api/validate-resume
///
/// Pure structural validation; always 200 with a report, never an error for
/// merely-invalid resumes.
pub async fn handle_validate_resume(
    Json(request): Json<ValidateResumeRequest>,
) -> Json<ValidationReport> {
    Json(validate_resume(&request.resume_data))
}

/// GET /api/sample-resume
///
/// Returns the embedded sample with per-section guidance for first-time users.
pub async fn handle_sample_resume() -> Result<Json<Value>, AppError> {
    let sample: Value = serde_json::from_str(SAMPLE_RESUME)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("embedded sample is invalid: {e}")))?;

    Ok(Json(json!({
        "success": true,
        "sampleData": sample,
        "instructions": {
            "personal": "Required: Your contact information",
            "summary": "Professional summary with headline and bullet points",
            "experience": "Work history with achievements containing keywords and metrics",
            "skills": "Technical skills organized by category and proficiency level",
            "education": "Educational background",
            "projects": "Key projects with descriptions and keywords"
        }
    })))
}
