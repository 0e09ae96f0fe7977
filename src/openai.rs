//! OpenAI chat-completions client
//!
//! Thin client for an OpenAI-compatible chat-completions endpoint. The
//! wire format mirrors the upstream contract and is not owned by this
//! service; only the fields the planner needs are modeled.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::OpenAiConfig;
use crate::error::TripVaultsError;

/// Seam between the planner and the completion API. Production uses
/// [`OpenAiClient`]; tests substitute scripted implementations.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Run a single completion call and return the generated text.
    async fn complete(&self, system: &str, prompt: &str) -> crate::Result<String>;

    /// Backend name used in logs
    fn name(&self) -> &str;
}

/// Client for an OpenAI-compatible chat-completions endpoint
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
    api_key: String,
}

impl OpenAiClient {
    /// Create a new client with the timeout from configuration applied
    /// to every outbound request. Fails when no credential is configured.
    pub fn new(config: OpenAiConfig) -> crate::Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TripVaultsError::config("OpenAI API key not configured"))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent("TripVaults/0.1.0")
            .build()
            .map_err(|e| TripVaultsError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

// ---------- API request/response types ----------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
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

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    #[serde(rename = "type")]
    error_type: Option<String>,
}

// ---------- CompletionBackend implementation ----------

#[async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> crate::Result<String> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!(model = %self.config.model, "Sending completion request");
        let started = Instant::now();

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TripVaultsError::upstream(format!("Failed to reach completion API: {e}"))
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            TripVaultsError::upstream(format!("Failed to read completion API response: {e}"))
        })?;

        if !status.is_success() {
            warn!(%status, "Completion API returned an error");

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&text) {
                let error_type = api_error.error.error_type.as_deref().unwrap_or("unknown");
                return Err(TripVaultsError::upstream(format!(
                    "Completion API error ({error_type}): {}",
                    api_error.error.message
                )));
            }

            let snippet: String = text.chars().take(500).collect();
            return Err(TripVaultsError::upstream(format!(
                "Completion API returned HTTP {status}: {snippet}"
            )));
        }

        let parsed: ChatResponse = serde_json::from_str(&text).map_err(|e| {
            TripVaultsError::upstream(format!("Failed to parse completion API response: {e}"))
        })?;

        let content = parsed
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .unwrap_or("")
            .to_string();

        if content.is_empty() {
            return Err(TripVaultsError::upstream(format!(
                "Completion API returned no content (choices: {})",
                parsed.choices.len()
            )));
        }

        debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Completion request finished"
        );
        Ok(content)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
