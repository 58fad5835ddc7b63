use std::sync::Arc;
use tracing::{info, warn};
use anyhow::Result;

use crate::config::LlmConfig;
use crate::llm::interface::StructuredLLMInterface;
use crate::llm::openai_compatible_llm::OpenAICompatibleLLM;

/// Factory for creating structured-output LLM instances
pub struct StructuredLLMFactory;

impl StructuredLLMFactory {
    /// Create an LLM based on the configured provider.
    ///
    /// Every supported provider speaks the OpenAI chat-completions dialect and
    /// differs only in `base_url`, credentials and model name.
    pub fn create_llm(config: &LlmConfig) -> Result<Arc<dyn StructuredLLMInterface>> {
        info!("Initializing LLM: {}", config.provider);

        match config.provider.as_str() {
            "openai_llm" | "openai_compatible_llm" | "gemini_llm" | "deepseek_llm"
            | "groq_llm" | "mistral_llm" => {
                let api_key = config.resolved_api_key();
                if api_key.is_none() {
                    warn!(
                        "No API key configured for {}; generation requests will fail",
                        config.provider
                    );
                }
                Ok(Arc::new(OpenAICompatibleLLM::new(
                    config.model.clone(),
                    config.base_url.clone(),
                    api_key,
                    config.temperature,
                )))
            }
            _ => Err(anyhow::anyhow!("Unsupported LLM provider: {}", config.provider)),
        }
    }
}
