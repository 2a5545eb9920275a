use anyhow::Context;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::error;

pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Failures talking to the chat-completion endpoint.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("AI service is not configured")]
    NotConfigured,
    #[error("model endpoint rate limited the request")]
    RateLimited,
    #[error("model endpoint credits exhausted")]
    QuotaExceeded,
    #[error("model endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to parse LLM JSON: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl LlmError {
    /// Classify a non-success status from the endpoint.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited,
            StatusCode::PAYMENT_REQUIRED => LlmError::QuotaExceeded,
            _ => LlmError::Status { status, body },
        }
    }
}

/// Connection settings for the model endpoint, read once at startup.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let base_url =
            dotenv::var("LLM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = dotenv::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let api_key = dotenv::var("LOVABLE_API_KEY")
            .or_else(|_| dotenv::var("LLM_API_KEY"))
            .ok()
            .filter(|k| !k.is_empty());

        Self {
            base_url,
            model,
            api_key,
        }
    }
}

/// Something that can answer a chat-completion request.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier sent upstream.
    fn model(&self) -> &str;

    /// Whether a credential is available.
    fn is_configured(&self) -> bool;

    /// Single non-streaming completion; returns the reply text, empty when
    /// the reply carried no content.
    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError>;
}

pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Resolve the chat completions endpoint from the base URL.
    fn endpoint(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        if base.ends_with("/chat/completions") {
            base.to_string()
        } else if base.ends_with("/v1") {
            format!("{}/chat/completions", base)
        } else {
            format!("{}/v1/chat/completions", base)
        }
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    fn model(&self) -> &str {
        &self.config.model
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn chat(&self, messages: &[Message]) -> Result<String, LlmError> {
        let Some(key) = &self.config.api_key else {
            return Err(LlmError::NotConfigured);
        };

        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
        });

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            error!(status = status.as_u16(), body = %text, "AI gateway error");
            return Err(LlmError::from_status(status, text));
        }

        let json: serde_json::Value = serde_json::from_str(&text)?;

        // Extract content from choices[0].message.content (handle null)
        let content = json["choices"]
            .get(0)
            .and_then(|c| c["message"]["content"].as_str())
            .unwrap_or("")
            .to_string();

        Ok(content)
    }
}
