//! HTTP handlers for all API routes.

pub mod chat;
pub mod civic;
pub mod health;
pub mod report;

use oncodex_llm::{LlmRequest, Message};

use crate::config::GenerationConfig;

/// Assemble a single-turn completion request with the role's sampling
/// settings applied.
pub(crate) fn llm_request(prompt: String, generation: &GenerationConfig) -> LlmRequest {
    LlmRequest {
        messages: vec![Message::user(prompt)],
        model: None,
        max_tokens: Some(generation.max_tokens),
        temperature: Some(generation.temperature),
        top_p: Some(generation.top_p),
        top_k: Some(generation.top_k),
    }
}
