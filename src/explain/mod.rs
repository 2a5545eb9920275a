pub mod prompts;
pub mod sections;
pub mod types;

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::error::ApiError;
use crate::llm::{ChatModel, Message};

use types::{ExplanationRequest, ExplanationSections};

/// Turns a student's question into a sectioned explanation with one model call.
pub struct ExplainEngine {
    llm: Arc<dyn ChatModel>,
}

impl ExplainEngine {
    pub fn new(llm: Arc<dyn ChatModel>) -> Self {
        Self { llm }
    }

    /// The trimmed question, or a validation error when it is missing or blank.
    pub fn validate(req: &ExplanationRequest) -> Result<&str, ApiError> {
        req.question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or(ApiError::Validation)
    }

    pub async fn explain(&self, req: &ExplanationRequest) -> Result<ExplanationSections, ApiError> {
        info!(
            subject = %req.subject,
            detail_level = %req.detail_level,
            question_len = req.question.as_deref().map(str::len).unwrap_or(0),
            "Processing question"
        );

        Self::validate(req).inspect_err(|_| warn!("Rejected empty question"))?;

        if !self.llm.is_configured() {
            error!("LOVABLE_API_KEY is not configured");
            return Err(ApiError::Configuration);
        }

        // Trimming only gates validation; the prompt carries the question as sent.
        let question = req.question.as_deref().unwrap_or_default();
        let prompts = prompts::build_prompts(question, &req.subject, req.detail_level);
        let messages = [Message::system(prompts.system), Message::user(prompts.user)];

        info!(model = self.llm.model(), "Calling AI gateway");
        let content = self.llm.chat(&messages).await.map_err(|e| {
            error!(error = %e, "AI gateway call failed");
            ApiError::from(e)
        })?;

        info!(content_len = content.len(), "AI response received, parsing sections");
        let sections = sections::parse_sections(&content);
        debug!(
            fallback = sections.steps.is_empty() && sections.explanation == content,
            "Sections parsed"
        );

        Ok(sections)
    }
}
