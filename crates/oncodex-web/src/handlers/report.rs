//! Report generation endpoint: CIViC Markdown + variant metadata in, a
//! structured clinical report out.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use oncodex_civic::VariantInfo;
use oncodex_common::ApiError;

use crate::handlers::llm_request;
use crate::prompts::build_report_prompt;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub civic_markdown: Option<String>,
    pub variant_info: Option<VariantInfo>,
}

#[derive(Debug, Serialize)]
pub struct GenerateReportReply {
    pub report: String,
}

/// POST /api/generate-report
pub async fn generate_report(
    State(state): State<SharedState>,
    Json(payload): Json<GenerateReportRequest>,
) -> Result<Json<GenerateReportReply>, ApiError> {
    let (civic_markdown, variant_info) = match (payload.civic_markdown, payload.variant_info) {
        (Some(markdown), Some(info)) => (markdown, info),
        _ => {
            return Err(ApiError::BadRequest(
                "Missing required data: civicMarkdown and variantInfo are required".to_string(),
            ))
        }
    };

    if variant_info.gene.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Gene name is required in variantInfo".to_string(),
        ));
    }

    let prompt = build_report_prompt(&civic_markdown, &variant_info);
    let response = state
        .report_llm
        .complete(llm_request(prompt, &state.report_generation))
        .await
        .map_err(|e| ApiError::Generation(e.to_string()))?;

    info!(
        model = %response.model,
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        gene = %variant_info.gene,
        "report generated"
    );

    Ok(Json(GenerateReportReply {
        report: response.content,
    }))
}
