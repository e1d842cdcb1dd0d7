//! Reqwest-based client for OpenAI-compatible Chat Completions (single, non-streamed reply).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE},
    StatusCode,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to send completion request: {0}")]
    Http(#[from] reqwest::Error),
    #[error("LLM error: {status} - {body}")]
    Status { status: StatusCode, body: String },
    #[error("invalid API key header: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("completion response contained no message content")]
    EmptyResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

#[derive(Debug, Clone)]
pub struct ChatOptions {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
}

impl ChatOptions {
    /// temperature 0, top_p 1.
    pub fn deterministic(model: impl Into<String>) -> Self {
        Self { model: model.into(), temperature: 0.0, top_p: 1.0 }
    }
}

/// One system instruction plus one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub system: String,
    pub user: String,
}

/// Black-box text completion. Errors are returned untouched; implementations do not retry.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug)]
pub struct LlmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl LlmClient {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let timeout = cfg.get_u64("REQUEST_TIMEOUT").unwrap_or(60);
        let base_url = normalize_base_url(&cfg.get("API_BASE_URL").unwrap_or_else(|| "default".into()));
        let api_key = cfg.get("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            warn!("OPENAI_API_KEY is not set; requests will be sent without authorization");
        }
        let model = cfg.get("DEFAULT_MODEL").unwrap_or_else(|| "gpt-4".into());

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout))
            .build()?;

        Ok(Self { http, base_url, api_key, model })
    }

    pub async fn chat(&self, messages: Vec<ChatMessage>, opts: ChatOptions) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &self.api_key {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", key))?);
        }

        let body = serde_json::json!({
            "model": opts.model,
            "temperature": opts.temperature,
            "top_p": opts.top_p,
            "messages": messages,
            "stream": false,
        });

        debug!(model = %opts.model, %url, "sending completion request");
        let resp = self.http.post(url).headers(headers).json(&body).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let completion: Completion = resp.json().await?;
        completion.into_content()
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let messages = vec![
            ChatMessage::new(Role::System, request.system),
            ChatMessage::new(Role::User, request.user),
        ];
        self.chat(messages, ChatOptions::deterministic(self.model.clone())).await
    }
}

fn normalize_base_url(configured: &str) -> String {
    if configured == "default" || configured.trim().is_empty() {
        return DEFAULT_BASE_URL.to_string();
    }
    let trimmed = configured.trim_end_matches('/');
    if !trimmed.ends_with("/v1") && !trimmed.contains("/v1/") {
        format!("{}/v1", trimmed)
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Deserialize)]
struct Completion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl Completion {
    fn into_content(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}
