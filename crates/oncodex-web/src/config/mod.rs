//! Configuration loading for Oncodex.
//! Reads oncodex.toml from the current directory or the path in the
//! ONCODEX_CONFIG env var; a missing file falls back to defaults. Everything
//! here is resolved once at startup and passed into client constructors —
//! nothing else in the service reads the environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub civic: CivicConfig,
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3001 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CivicConfig {
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,
}

fn default_graphql_url() -> String {
    oncodex_civic::client::DEFAULT_GRAPHQL_URL.to_string()
}

impl Default for CivicConfig {
    fn default() -> Self {
        Self { graphql_url: default_graphql_url() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// "gemini" (default) or "ollama" for keyless local development.
    #[serde(default = "default_llm_mode")]
    pub mode: String,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
    #[serde(default = "default_report_generation")]
    pub report: GenerationConfig,
    #[serde(default = "default_chat_generation")]
    pub chat: GenerationConfig,
}

fn default_llm_mode() -> String { "gemini".to_string() }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mode: default_llm_mode(),
            gemini: GeminiConfig::default(),
            ollama: OllamaConfig::default(),
            report: default_report_generation(),
            chat: default_chat_generation(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Left empty, the key is taken from ONCODEX_GEMINI_API_KEY or
    /// GOOGLE_GEMINI_API_KEY at startup.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_report_model")]
    pub report_model: String,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
}

fn default_report_model() -> String { "gemini-2.5-pro".to_string() }
fn default_chat_model() -> String { "gemini-2.5-flash".to_string() }

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            report_model: default_report_model(),
            chat_model: default_chat_model(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    #[serde(default = "default_ollama_url")]
    pub base_url: String,
    #[serde(default = "default_ollama_model")]
    pub model: String,
}

fn default_ollama_url() -> String { "http://localhost:11434".to_string() }
fn default_ollama_model() -> String { "llama3:8b".to_string() }

impl Default for OllamaConfig {
    fn default() -> Self {
        Self { base_url: default_ollama_url(), model: default_ollama_model() }
    }
}

/// Sampling settings for one generation role.
/// Report generation runs cooler than chat: factual medical content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_tokens: u32,
}

fn default_report_generation() -> GenerationConfig {
    GenerationConfig { temperature: 0.3, top_p: 0.8, top_k: 40, max_tokens: 8192 }
}

fn default_chat_generation() -> GenerationConfig {
    GenerationConfig { temperature: 0.5, top_p: 0.9, top_k: 40, max_tokens: 2048 }
}


impl Config {
    /// Load configuration from oncodex.toml.
    /// Checks ONCODEX_CONFIG env var first, then the current directory;
    /// a missing file yields the defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("ONCODEX_CONFIG")
            .unwrap_or_else(|_| "oncodex.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::warn!(
                "Config file not found: {} — falling back to defaults \
                 (copy oncodex.example.toml to oncodex.toml to customise)",
                path
            );
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Resolve the Gemini API key: explicit config value first, then the
    /// ONCODEX_GEMINI_API_KEY / GOOGLE_GEMINI_API_KEY env vars.
    pub fn gemini_api_key(&self) -> String {
        if !self.llm.gemini.api_key.is_empty() {
            return self.llm.gemini.api_key.clone();
        }
        std::env::var("ONCODEX_GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_GEMINI_API_KEY"))
            .unwrap_or_default()
    }
}
