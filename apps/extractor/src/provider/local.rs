//! Locally-hosted model backend — an OpenAI-compatible chat endpoint
//! (llama.cpp server, Ollama, vLLM) on the operator's own machine.
//! Lowest remote priority; no auth header.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::provider::chat::{ChatMessage, ChatRequest, ChatResponse};
use crate::provider::prompts::JSON_ONLY_SYSTEM;
use crate::provider::{GenerateBackend, ProviderError};

const MAX_TOKENS: u32 = 1000;
const PROBE_MAX_TOKENS: u32 = 10;

pub struct LocalModelBackend {
    client: Client,
    url: String,
    model: String,
    probe_timeout: Duration,
    generate_timeout: Duration,
}

impl LocalModelBackend {
    pub fn new(config: &Config) -> Self {
        LocalModelBackend {
            client: Client::new(),
            url: config.local_api_url.clone(),
            model: config.chat_model.clone(),
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
            temperature: 0.7,
            top_p: 0.9,
        };

        let response = self
            .client
            .post(&self.url)
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
impl GenerateBackend for LocalModelBackend {
    fn name(&self) -> &'static str {
        "local-model"
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
