//! Structuring providers — the single point of entry for all remote
//! text-generation calls in the pipeline.
//!
//! A fixed, ordered set of backends is probed once at process start; the
//! first backend that answers becomes the active provider for the process
//! lifetime. Generation failures never re-probe — they surface upward and
//! route the current document to the heuristic path.

pub mod chat;
pub mod inference;
pub mod local;
pub mod prompts;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Provider returned empty content")]
    EmptyContent,
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Http(e) if e.is_timeout())
    }
}

/// Capability interface for one text-generation backend. Selection logic
/// iterates a prioritized list of these, independent of how many exist.
#[async_trait]
pub trait GenerateBackend: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lightweight connectivity check: minimal payload, short timeout.
    async fn probe(&self) -> Result<(), ProviderError>;

    /// Sends the structuring instruction and returns the raw response
    /// text. The caller never assumes the response is valid JSON.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// The provider-selection outcome, computed once at startup and treated
/// as read-only thereafter.
#[derive(Clone)]
pub enum ActiveProvider {
    Remote(Arc<dyn GenerateBackend>),
    /// No remote backend answered its probe: the deterministic heuristic
    /// parser handles every document.
    Heuristic,
}

impl ActiveProvider {
    pub fn name(&self) -> &'static str {
        match self {
            ActiveProvider::Remote(backend) => backend.name(),
            ActiveProvider::Heuristic => "heuristic",
        }
    }
}

/// Probes each configured backend in priority order (hosted chat
/// completion, then hosted inference, then locally-hosted model) and
/// returns the first that responds. Backends without credentials are
/// skipped.
pub async fn select_provider(config: &Config) -> ActiveProvider {
    let mut candidates: Vec<Arc<dyn GenerateBackend>> = Vec::new();

    if !config.chat_api_key.is_empty() {
        candidates.push(Arc::new(chat::ChatCompletionBackend::new(config)));
    }
    if !config.inference_api_key.is_empty() {
        candidates.push(Arc::new(inference::InferenceBackend::new(config)));
    }
    if !config.local_api_url.is_empty() {
        candidates.push(Arc::new(local::LocalModelBackend::new(config)));
    }

    for backend in candidates {
        match backend.probe().await {
            Ok(()) => {
                info!("Using {} structuring provider", backend.name());
                return ActiveProvider::Remote(backend);
            }
            Err(e) => {
                warn!("{} probe failed: {e}", backend.name());
            }
        }
    }

    warn!("No structuring provider available, using heuristic parser for all documents");
    ActiveProvider::Heuristic
}
