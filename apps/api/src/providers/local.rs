//! Local provider — resume parsing via any OpenAI-compatible endpoint
//! (LM Studio, llama.cpp server, vLLM). No real API key required.

use async_trait::async_trait;

use crate::models::resume::Resume;
use crate::providers::prompts::PARSE_RESUME_SYSTEM;
use crate::providers::{AiProvider, ChatClient, ProviderError, ProviderStatus};

pub struct LocalProvider {
    client: ChatClient,
}

impl LocalProvider {
    pub fn new(base_url: String, model: String) -> Self {
        Self {
            // Local endpoints ignore the bearer token but the header must exist.
            client: ChatClient::new(base_url, "not-needed".to_string(), model),
        }
    }
}

#[async_trait]
impl AiProvider for LocalProvider {
    async fn parse_resume_text(&self, text_resume: &str) -> Result<Resume, ProviderError> {
        let user = format!("Convert this resume to JSON:\n\n{text_resume}");
        self.client.complete_resume(PARSE_RESUME_SYSTEM, &user).await
    }

    async fn check(&self) -> ProviderStatus {
        let result = self.client.probe().await;
        ProviderStatus {
            success: result.is_ok(),
            provider: self.provider_name().to_string(),
            model: self.model_name().to_string(),
            base_url: Some(self.client.base_url().to_string()),
            error: result.err().map(|e| e.to_string()),
        }
    }

    fn provider_name(&self) -> &str {
        "local"
    }

    fn model_name(&self) -> &str {
        self.client.model()
    }
}
