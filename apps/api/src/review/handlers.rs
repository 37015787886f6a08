//! Axum route handlers for the Review API.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::extract::{extract_text, looks_like_pdf};
use crate::render::render_pdf;
use crate::review::{run_review, ReviewRequest, ReviewResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub resume_text: String,
    #[serde(default)]
    pub target_role: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub feedback: String,
    pub improved_resume: Option<String>,
}

impl From<ReviewResult> for ReviewResponse {
    fn from(result: ReviewResult) -> Self {
        Self {
            feedback: result.feedback_text,
            improved_resume: result.improved_resume_text,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderPdfBody {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/review
///
/// Reviews pasted resume text against a target role. One model call, no
/// retries — on failure the user corrects input and resubmits.
pub async fn handle_review(
    State(state): State<AppState>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<ReviewResponse>, AppError> {
    let request = ReviewRequest::new(body.resume_text, body.target_role, body.job_description)?;
    let result = run_review(state.model.as_ref(), &request).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/review/upload
///
/// Multipart variant: `resume` file (PDF or plain text) plus optional
/// `target_role` and `job_description` text fields.
pub async fn handle_review_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ReviewResponse>, AppError> {
    let mut resume_text: Option<String> = None;
    let mut target_role = String::new();
    let mut job_description = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let content_type = field.content_type().map(str::to_string);
                let filename = field.file_name().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

                let is_pdf = looks_like_pdf(content_type.as_deref(), filename.as_deref());
                // PDF parsing is CPU-bound; keep it off the async executor.
                resume_text = Some(
                    tokio::task::spawn_blocking(move || extract_text(&data, is_pdf))
                        .await
                        .map_err(|e| AppError::Internal(e.into()))??,
                );
            }
            Some("target_role") => {
                target_role = read_text_field(field).await?;
            }
            Some("job_description") => {
                job_description = read_text_field(field).await?;
            }
            _ => {}
        }
    }

    let resume_text = resume_text.ok_or_else(|| {
        AppError::Validation("Missing 'resume' file field in upload".to_string())
    })?;

    let request = ReviewRequest::new(resume_text, target_role, job_description)?;
    let result = run_review(state.model.as_ref(), &request).await?;
    Ok(Json(result.into()))
}

/// POST /api/v1/render/pdf
///
/// Renders feedback or an improved resume as a downloadable single-font PDF.
pub async fn handle_render_pdf(
    Json(body): Json<RenderPdfBody>,
) -> Result<impl IntoResponse, AppError> {
    if body.text.trim().is_empty() {
        return Err(AppError::Validation(
            "Text to render cannot be empty".to_string(),
        ));
    }

    let bytes = tokio::task::spawn_blocking(move || render_pdf(&body.text))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"improved_resume.pdf\"",
            ),
        ],
        bytes,
    ))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))
}
