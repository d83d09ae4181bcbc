//! AI providers — the single point of entry for all LLM calls in the
//! service.
//!
//! Text-to-JSON resume conversion is delegated to a provider implementing
//! `AiProvider`, selected once at process startup from configuration and
//! injected into handlers through `AppState`. Two implementations exist:
//! the OpenAI API and any OpenAI-compatible local endpoint (e.g. LM
//! Studio). No other module may perform LLM HTTP calls.

pub mod handlers;
pub mod local;
pub mod openai;
pub mod prompts;

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::models::resume::Resume;

const MAX_TOKENS: u32 = 4000;
const TEMPERATURE: f64 = 0.1;
const MAX_RETRIES: u32 = 3;

/// Provider failure taxonomy. `Connection` and `Api` are kept distinct so
/// the API layer can tell the user "could not reach the AI service" apart
/// from "the AI service rejected the request".
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("AI provider connection failed: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("AI provider returned an error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("AI provider returned malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("AI provider returned empty content")]
    EmptyContent,

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("{0}")]
    Config(String),
}

/// Connectivity probe result, surfaced by the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderStatus {
    pub success: bool,
    pub provider: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Strategy interface for text-to-JSON resume conversion.
///
/// Carried in `AppState` as `Arc<dyn AiProvider>`; swapping providers never
/// touches handler code.
#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn parse_resume_text(&self, text_resume: &str) -> Result<Resume, ProviderError>;

    /// Cheap connectivity check (one-token completion).
    async fn check(&self) -> ProviderStatus;

    fn provider_name(&self) -> &str;
    fn model_name(&self) -> &str;
}

/// Selects and constructs the provider once at startup. Handlers only ever
/// see the trait object; ambient env is never read at call time.
pub fn create_provider(config: &Config) -> Result<Arc<dyn AiProvider>> {
    match config.ai_provider.as_str() {
        "openai" => {
            let Some(api_key) = config.openai_api_key.clone() else {
                bail!("OpenAI API key not configured. Set OPENAI_API_KEY environment variable.");
            };
            Ok(Arc::new(openai::OpenAiProvider::new(
                api_key,
                config.openai_model.clone(),
            )))
        }
        "local" => Ok(Arc::new(local::LocalProvider::new(
            config.local_llm_base_url.clone(),
            config.local_model_name.clone(),
        ))),
        other => bail!("Unknown AI provider: {other}. Must be 'openai' or 'local'."),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared OpenAI-format chat client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Chat-completions client shared by both providers. Retries on 429 and 5xx
/// with exponential backoff; anything else is surfaced immediately.
pub(crate) struct ChatClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl ChatClient {
    pub(crate) fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            api_key,
            model,
        }
    }

    pub(crate) fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One chat completion; returns the assistant message text.
    pub(crate) async fn complete(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, ProviderError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut last_error: Option<ProviderError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "AI call attempt {} failed, retrying after {}ms",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(ProviderError::Connection(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("AI API returned {}: {}", status, body);
                last_error = Some(ProviderError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(ProviderError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;
            let content = chat
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or(ProviderError::EmptyContent)?;

            debug!("AI call succeeded ({} chars)", content.len());
            return Ok(content);
        }

        Err(last_error.unwrap_or(ProviderError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Completion that parses the response text as a `Resume`, stripping any
    /// markdown code fences the model wraps around its JSON.
    pub(crate) async fn complete_resume(
        &self,
        system: &str,
        user: &str,
    ) -> Result<Resume, ProviderError> {
        let text = self.complete(system, user, MAX_TOKENS).await?;
        let json = strip_json_fences(&text);
        serde_json::from_str(json).map_err(ProviderError::Parse)
    }

    /// One-token completion used as a connectivity probe.
    pub(crate) async fn probe(&self) -> Result<(), ProviderError> {
        self.complete("", "test", 1).await.map(|_| ())
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(provider: &str, key: Option<&str>) -> Config {
        Config {
            ai_provider: provider.to_string(),
            openai_api_key: key.map(String::from),
            openai_model: "gpt-4o-mini".to_string(),
            local_llm_base_url: "http://localhost:1234/v1".to_string(),
            local_model_name: "local-model".to_string(),
            host: "127.0.0.1".to_string(),
            port: 5000,
            rust_log: "info".to_string(),
            pdf_renderer: "wkhtmltopdf".to_string(),
        }
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_factory_rejects_unknown_provider() {
        let err = create_provider(&test_config("azure", None)).err().unwrap();
        assert!(err.to_string().contains("Unknown AI provider"));
    }

    #[test]
    fn test_factory_requires_openai_key() {
        let err = create_provider(&test_config("openai", None)).err().unwrap();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_factory_builds_local_without_key() {
        let provider = create_provider(&test_config("local", None)).unwrap();
        assert_eq!(provider.provider_name(), "local");
    }

    #[test]
    fn test_factory_builds_openai_with_key() {
        let provider = create_provider(&test_config("openai", Some("sk-test"))).unwrap();
        assert_eq!(provider.provider_name(), "openai");
        assert_eq!(provider.model_name(), "gpt-4o-mini");
    }

    #[test]
    fn test_connection_and_api_errors_are_distinct() {
        let api = ProviderError::Api {
            status: 400,
            message: "bad request".to_string(),
        };
        assert!(api.to_string().contains("returned an error"));

        let parse = ProviderError::Parse(
            serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
        );
        assert!(parse.to_string().contains("malformed JSON"));
    }
}
