//! Shared application state for the web server.

use std::sync::Arc;

use oncodex_civic::{CivicClient, VariantNormaliser};
use oncodex_llm::{GeminiBackend, LlmBackend, OllamaBackend};

use crate::config::{Config, GenerationConfig};

/// Shared state injected into every Axum handler. Immutable after startup;
/// requests share clients but no mutable state.
pub struct AppState {
    pub civic: CivicClient,
    pub report_llm: Arc<dyn LlmBackend>,
    pub chat_llm: Arc<dyn LlmBackend>,
    pub normaliser: VariantNormaliser,
    pub report_generation: GenerationConfig,
    pub chat_generation: GenerationConfig,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build all clients from the resolved configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let civic = CivicClient::new(config.civic.graphql_url.clone())?;

        let (report_llm, chat_llm): (Arc<dyn LlmBackend>, Arc<dyn LlmBackend>) =
            match config.llm.mode.as_str() {
                "ollama" => {
                    let ollama = &config.llm.ollama;
                    (
                        Arc::new(OllamaBackend::new(&ollama.base_url, &ollama.model)),
                        Arc::new(OllamaBackend::new(&ollama.base_url, &ollama.model)),
                    )
                }
                "gemini" => {
                    let key = config.gemini_api_key();
                    if key.is_empty() {
                        anyhow::bail!(
                            "Gemini mode requires an API key \
                             (set llm.gemini.api_key in oncodex.toml, or the \
                             ONCODEX_GEMINI_API_KEY / GOOGLE_GEMINI_API_KEY env var)"
                        );
                    }
                    (
                        Arc::new(GeminiBackend::new(
                            key.clone(),
                            config.llm.gemini.report_model.clone(),
                        )),
                        Arc::new(GeminiBackend::new(
                            key,
                            config.llm.gemini.chat_model.clone(),
                        )),
                    )
                }
                other => anyhow::bail!("Unknown llm.mode: {other} (expected \"gemini\" or \"ollama\")"),
            };

        tracing::info!(
            mode = %config.llm.mode,
            report_model = report_llm.model_id(),
            chat_model = chat_llm.model_id(),
            "LLM backends configured"
        );

        Ok(Self {
            civic,
            report_llm,
            chat_llm,
            normaliser: VariantNormaliser::new(),
            report_generation: config.llm.report.clone(),
            chat_generation: config.llm.chat.clone(),
        })
    }
}
