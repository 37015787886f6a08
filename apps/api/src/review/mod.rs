// Review pipeline: validate → build prompt → call model → parse.
// All LLM calls go through llm_client — no direct Anthropic calls here.

pub mod handlers;
pub mod parser;
pub mod prompts;

use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::ReviewModel;
use crate::review::parser::parse_review_response;
use crate::review::prompts::build_prompt;

/// One user submission: resume plus job target. Immutable once built; the
/// constructor is the single validation point, so an empty resume never
/// reaches the prompt builder or the model.
#[derive(Debug, Clone)]
pub struct ReviewRequest {
    resume_text: String,
    target_role: String,
    job_description: String,
}

impl ReviewRequest {
    pub fn new(
        resume_text: String,
        target_role: String,
        job_description: String,
    ) -> Result<Self, AppError> {
        if resume_text.trim().is_empty() {
            return Err(AppError::Validation(
                "Resume text cannot be empty — upload or paste a resume".to_string(),
            ));
        }
        Ok(Self {
            resume_text,
            target_role,
            job_description,
        })
    }
}

/// The model's review of one request. Read-only; lives only for the duration
/// of the response — nothing is persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResult {
    pub feedback_text: String,
    pub improved_resume_text: Option<String>,
}

/// Runs the full pipeline for one request: one prompt, one model call, one
/// result. Failures surface as `AppError::Review` and are never retried here;
/// the user resubmits manually.
pub async fn run_review(
    model: &dyn ReviewModel,
    request: &ReviewRequest,
) -> Result<ReviewResult, AppError> {
    let prompt = build_prompt(
        &request.resume_text,
        &request.target_role,
        &request.job_description,
    );

    let raw = model
        .complete(&prompt, prompts::REVIEW_SYSTEM)
        .await
        .map_err(|e| AppError::Review(format!("Review call failed: {e}")))?;

    if raw.trim().is_empty() {
        return Err(AppError::Review(
            "The model returned an empty response — please resubmit".to_string(),
        ));
    }

    Ok(parse_review_response(&raw))
}
