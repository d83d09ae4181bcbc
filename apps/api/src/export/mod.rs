//! PDF export — delegates HTML-to-PDF rendering to an external wkhtmltopdf
//! binary (or any drop-in compatible renderer configured via PDF_RENDERER).

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    Json,
};
use serde::Deserialize;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Page options passed to the renderer on every export.
const RENDER_ARGS: &[&str] = &[
    "--page-size",
    "Letter",
    "--margin-top",
    "0.5in",
    "--margin-right",
    "0.5in",
    "--margin-bottom",
    "0.5in",
    "--margin-left",
    "0.5in",
    "--encoding",
    "UTF-8",
    "--no-outline",
];

#[derive(Debug, Deserialize)]
pub struct ExportPdfRequest {
    pub html: String,
    #[serde(default = "default_filename")]
    pub filename: String,
}

fn default_filename() -> String {
    "resume.pdf".to_string()
}

/// POST /api/export-pdf
///
/// Writes the HTML to a scratch directory, runs the external renderer, and
/// streams the resulting PDF back as an attachment. The scratch directory
/// is removed when the handler returns.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(request): Json<ExportPdfRequest>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    if request.html.trim().is_empty() {
        return Err(AppError::Validation("Missing HTML content".to_string()));
    }

    let scratch = TempDir::new().map_err(anyhow::Error::from)?;
    let html_path = scratch.path().join("resume.html");
    let pdf_path = scratch.path().join("resume.pdf");

    tokio::fs::write(&html_path, &request.html)
        .await
        .map_err(anyhow::Error::from)?;

    let output = Command::new(&state.config.pdf_renderer)
        .args(RENDER_ARGS)
        .arg(&html_path)
        .arg(&pdf_path)
        .output()
        .await
        .map_err(|e| {
            warn!("PDF renderer '{}' failed to start: {e}", state.config.pdf_renderer);
            AppError::Export(format!(
                "PDF export not available. Install wkhtmltopdf or set PDF_RENDERER ({e})"
            ))
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::Export(format!(
            "PDF generation failed: {}",
            stderr.trim()
        )));
    }

    let pdf = tokio::fs::read(&pdf_path)
        .await
        .map_err(|e| AppError::Export(format!("PDF renderer produced no output: {e}")))?;

    debug!("exported {} byte PDF as {}", pdf.len(), request.filename);

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    let disposition = format!(
        "attachment; filename=\"{}\"",
        sanitize_filename(&request.filename)
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"resume.pdf\"")),
    );

    Ok((headers, pdf))
}

/// Keeps filenames header-safe: alphanumerics, dash, underscore, dot.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        default_filename()
    } else {
        cleaned
    }
}
