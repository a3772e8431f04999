//! Knowledgebase query endpoint: normalise the variant, fetch the evidence
//! tree from CIViC, and return it alongside its Markdown rendering.

use axum::extract::{Json, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use oncodex_civic::types::CivicQueryResponse;
use oncodex_civic::to_markdown;
use oncodex_common::ApiError;

use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CivicQueryRequest {
    pub gene: Option<String>,
    pub variant: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CivicQueryReply {
    pub civic_data: CivicQueryResponse,
    pub civic_markdown: String,
}

/// POST /api/query-civic
pub async fn query_civic(
    State(state): State<SharedState>,
    Json(payload): Json<CivicQueryRequest>,
) -> Result<Json<CivicQueryReply>, ApiError> {
    let gene = payload.gene.as_deref().map(str::trim).unwrap_or("");
    if gene.is_empty() {
        return Err(ApiError::BadRequest("Gene name is required".to_string()));
    }

    let normalised = payload
        .variant
        .as_deref()
        .map(|v| state.normaliser.normalise(v))
        .filter(|v| !v.is_empty());

    let civic_data = state
        .civic
        .search_variants(&gene.to_uppercase(), normalised.as_deref())
        .await?;

    let civic_markdown = to_markdown(&civic_data);

    info!(
        gene,
        variant = normalised.as_deref(),
        markdown_bytes = civic_markdown.len(),
        "CIViC query served"
    );

    Ok(Json(CivicQueryReply {
        civic_data,
        civic_markdown,
    }))
}
