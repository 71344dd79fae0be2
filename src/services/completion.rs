// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Chat-completions client (OpenAI-compatible API, Groq by default).
//!
//! Single request/response per call: no streaming, no retry.

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Sampling temperature for every request.
pub const TEMPERATURE: f32 = 0.7;
/// Output token budget for every request.
pub const MAX_TOKENS: u32 = 1500;

/// Chat-completions request body.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Chat-completions response (fields we read).
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Completion service client.
#[derive(Clone)]
pub struct CompletionClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl CompletionClient {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.completion_timeout)
            .build()?;

        Ok(Self {
            http,
            api_url: config.completion_api_url.clone(),
            api_key: config.completion_api_key.clone(),
            model: config.completion_model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one user prompt and return the first candidate's text, trimmed.
    pub async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let payload = CompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        tracing::debug!(
            model = %self.model,
            temperature = TEMPERATURE,
            max_tokens = MAX_TOKENS,
            prompt_len = prompt.len(),
            "Sending completion request"
        );

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                AppError::CompletionServiceFailure(format!("Completion request failed: {}", e))
            })?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Completion service responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Completion service error response");
            return Err(AppError::CompletionServiceFailure(format!(
                "Completion request failed with status: {}",
                status
            )));
        }

        let data: CompletionResponse = response.json().await.map_err(|e| {
            AppError::CompletionServiceFailure(format!("Malformed completion response: {}", e))
        })?;

        first_choice_text(data)
    }
}

/// Extract the first candidate's content, trimmed.
fn first_choice_text(data: CompletionResponse) -> Result<String, AppError> {
    data.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| {
            AppError::CompletionServiceFailure("Completion response has no choices".to_string())
        })
}
