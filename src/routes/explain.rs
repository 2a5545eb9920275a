use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::error::ApiError;
use crate::explain::types::ExplanationRequest;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ExplainParams {
    /// `text` renders the plain-text export instead of JSON.
    #[serde(default)]
    pub format: Option<String>,
}

/// Handler: POST /explain-question
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/explain-question \
///   -H 'content-type: application/json' \
///   -d '{"question":"What is a derivative?","subject":"mathematics","detailLevel":"concise"}'
/// ```
pub async fn explain_question(
    State(state): State<AppState>,
    params: Result<Query<ExplainParams>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let Query(params) = params.map_err(|e| {
        error!(error = %e, "Rejected explain-question query string");
        ApiError::internal(e.body_text())
    })?;

    // Body is parsed by hand so malformed JSON surfaces as `{ error }`.
    let req: ExplanationRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Error in explain-question handler");
        ApiError::internal(e)
    })?;

    let sections = state.engine.explain(&req).await?;

    if params.format.as_deref() == Some("text") {
        let headers = [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"explanation.txt\""),
        ];
        return Ok((headers, sections.to_string()).into_response());
    }

    Ok(Json(sections).into_response())
}
