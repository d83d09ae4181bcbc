use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sane default except OPENAI_API_KEY, which is only
/// required when AI_PROVIDER=openai (enforced by the provider factory).
#[derive(Debug, Clone)]
pub struct Config {
    pub ai_provider: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub local_llm_base_url: String,
    pub local_model_name: String,
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub pdf_renderer: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            ai_provider: env_or("AI_PROVIDER", "local"),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_model: env_or("OPENAI_MODEL", "gpt-4o-mini"),
            local_llm_base_url: env_or("LOCAL_LLM_BASE_URL", "http://localhost:1234/v1"),
            local_model_name: env_or("LOCAL_MODEL_NAME", "local-model"),
            host: env_or("HOST", "127.0.0.1"),
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            pdf_renderer: env_or("PDF_RENDERER", "wkhtmltopdf"),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
