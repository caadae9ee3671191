//! Secondary hosted inference backend (Hugging Face-style
//! `models/{id}` text-generation call).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::provider::{GenerateBackend, ProviderError};

const MAX_NEW_TOKENS: u32 = 512;
const PROBE_MAX_NEW_TOKENS: u32 = 10;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    do_sample: bool,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct InferenceResponseItem {
    #[serde(default)]
    generated_text: String,
}

pub struct InferenceBackend {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    probe_timeout: Duration,
    generate_timeout: Duration,
}

impl InferenceBackend {
    pub fn new(config: &Config) -> Self {
        InferenceBackend {
            client: Client::new(),
            api_key: config.inference_api_key.clone(),
            model: config.inference_model.clone(),
            base_url: config.inference_api_url.clone(),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            generate_timeout: Duration::from_secs(config.generate_timeout_secs),
        }
    }

    async fn call(
        &self,
        inputs: &str,
        max_new_tokens: u32,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let request = InferenceRequest {
            inputs,
            parameters: InferenceParameters {
                max_new_tokens,
                temperature: TEMPERATURE,
                do_sample: true,
                return_full_text: false,
            },
        };

        let response = self
            .client
            .post(&url)
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

        let body: Vec<InferenceResponseItem> = response.json().await?;
        body.into_iter()
            .next()
            .map(|item| item.generated_text)
            .filter(|t| !t.is_empty())
            .ok_or(ProviderError::EmptyContent)
    }
}

#[async_trait]
impl GenerateBackend for InferenceBackend {
    fn name(&self) -> &'static str {
        "hosted-inference"
    }

    async fn probe(&self) -> Result<(), ProviderError> {
        self.call("test", PROBE_MAX_NEW_TOKENS, self.probe_timeout)
            .await
            .map(|_| ())
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.call(prompt, MAX_NEW_TOKENS, self.generate_timeout)
            .await
    }
}
