//! oncodex-llm — LLM backend abstraction layer.
//!
//! One trait, two backends: Google Gemini for production report/chat
//! generation and a local OpenAI-compatible Ollama endpoint for keyless
//! development.

pub mod backend;

pub use backend::{GeminiBackend, LlmBackend, LlmError, LlmRequest, LlmResponse, Message, OllamaBackend};
