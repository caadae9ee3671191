//! Hosted chat-completion backend (Together-style `/v1/chat/completions`).
//! Highest priority in the probe order.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::provider::prompts::JSON_ONLY_SYSTEM;
use crate::provider::{GenerateBackend, ProviderError};

const MAX_TOKENS: u32 = 1000;
const PROBE_MAX_TOKENS: u32 = 10;
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseMessage {
    pub content: String,
}

pub struct ChatCompletionBackend {
    client: Client,
    api_key: String,
    model: String,
    url: String,
    probe_timeout: Duration,
    generate_timeout: Duration,
}

impl ChatCompletionBackend {
    pub fn new(config: &Config) -> Self {
        ChatCompletionBackend {
            client: Client::new(),
            api_key: config.chat_api_key.clone(),
            model: config.chat_model.clone(),
            url: config.chat_api_url.clone(),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
        }
    }

    async fn call(
        &self,
        user_content: &str,
        max_tokens: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: JSON_ONLY_SYSTEM,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            max_tokens,
            temperature: TEMPERATURE,
            top_p: TOP_P,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .timeout(timeout)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response.json().await?;
        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(ProviderError::EmptyContent)
    }
}

#[async_trait]
impl GenerateBackend for ChatCompletionBackend {
    fn name(&self) -> &'static str {
        "chat-completion"
    }

    async fn probe(&self) -> Result<(), ProviderError> {
        self.call("test", PROBE_MAX_TOKENS, self.probe_timeout)
            .await
            .map(|_| ())
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.call(prompt, MAX_TOKENS, self.generate_timeout).await
    }
}
