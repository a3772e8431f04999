//! Follow-up chat endpoint, grounded in a previously generated report and
//! the same CIViC Markdown context.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use oncodex_common::ApiError;

use crate::handlers::llm_request;
use crate::prompts::{build_chat_prompt, ChatMessage, ReportContext};
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
    pub question: Option<String>,
    pub report_context: Option<ReportContext>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub response: String,
}

/// POST /api/chat
pub async fn chat_submit(
    State(state): State<SharedState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let question = payload.question.as_deref().map(str::trim).unwrap_or("");
    if question.is_empty() {
        return Err(ApiError::BadRequest("Question is required".to_string()));
    }

    let context = payload.report_context.ok_or_else(|| {
        ApiError::BadRequest("Report context with variantInfo and report is required".to_string())
    })?;
    if context.report.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Report context with variantInfo and report is required".to_string(),
        ));
    }

    let prompt = build_chat_prompt(&payload.conversation_history, question, &context);
    let response = state
        .chat_llm
        .complete(llm_request(prompt, &state.chat_generation))
        .await
        .map_err(|e| ApiError::Generation(e.to_string()))?;

    info!(
        model = %response.model,
        history_len = payload.conversation_history.len(),
        gene = %context.variant_info.gene,
        "chat turn served"
    );

    Ok(Json(ChatReply {
        response: response.content,
    }))
}
