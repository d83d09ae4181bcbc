//! Axum route handler for AI-backed resume parsing.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::Resume;
use crate::models::validation::ValidationReport;
use crate::state::AppState;
use crate::validation::validate_resume;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeRequest {
    pub text_resume: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeResponse {
    pub success: bool,
    pub resume_data: Resume,
    pub validation: ValidationReport,
    pub message: String,
}

/// POST /api/parse-resume
///
/// Delegates text-to-JSON conversion to the configured AI provider, then
/// runs the parsed result through the same structural validation the client
/// would get from /api/validate-resume.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseResumeRequest>,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let text = request.text_resume.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "textResume cannot be empty".to_string(),
        ));
    }

    let resume = state.ai.parse_resume_text(text).await?;

    info!(
        provider = state.ai.provider_name(),
        model = state.ai.model_name(),
        "resume parsed from text"
    );

    let validation = validate_resume(&serde_json::to_value(&resume).map_err(anyhow::Error::from)?);

    Ok(Json(ParseResumeResponse {
        success: true,
        resume_data: resume,
        validation,
        message: "Resume successfully converted to structured JSON format".to_string(),
    }))
}
