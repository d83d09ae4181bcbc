//! Unified application error type.
//!
//! Every handler returns `Result<_, AppError>`; the `IntoResponse` impl maps
//! each failure to a status code and a structured JSON body so clients see
//! a consistent `{"error": {"code", "message"}}` shape.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::validation::ValidationReport;
use crate::providers::ProviderError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("resume failed validation")]
    InvalidResume(ValidationReport),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::InvalidResume(report) => {
                warn!("rejected invalid resume: {:?}", report.errors);
                let body = json!({
                    "error": {
                        "code": "INVALID_RESUME",
                        "message": "Resume data failed validation",
                    },
                    "validation": report,
                });
                return (StatusCode::BAD_REQUEST, Json(body)).into_response();
            }
            AppError::Provider(err) => {
                warn!("provider failure: {err}");
                let status = match err {
                    ProviderError::Connection(_) | ProviderError::RateLimited { .. } => {
                        StatusCode::BAD_GATEWAY
                    }
                    ProviderError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
                    _ => StatusCode::BAD_GATEWAY,
                };
                (status, "PROVIDER_ERROR", err.to_string())
            }
            AppError::Export(msg) => {
                error!("export failure: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "EXPORT_ERROR", msg.clone())
            }
            AppError::Internal(err) => {
                error!("internal error: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
            }
        });
        (status, Json(body)).into_response()
    }
}
