//! OpenAI provider — resume parsing via the OpenAI chat completions API.

use async_trait::async_trait;

use crate::models::resume::Resume;
use crate::providers::prompts::PARSE_RESUME_SYSTEM;
use crate::providers::{AiProvider, ChatClient, ProviderError, ProviderStatus};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    client: ChatClient,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: ChatClient::new(OPENAI_BASE_URL.to_string(), api_key, model),
        }
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
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
            base_url: None,
            error: result.err().map(|e| e.to_string()),
        }
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    fn model_name(&self) -> &str {
        self.client.model()
    }
}
