#![allow(dead_code)]

use thiserror::Error;

/// Pipeline-level error type.
///
/// Only `UnsupportedFormat` and `SourceNotFound` are fatal to a single
/// document; everything else is absorbed by the orchestrator's fallback
/// chain and recorded as a diagnostic line instead of being raised.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Source not found: {0}")]
    SourceNotFound(String),

    #[error("No structuring provider available: {0}")]
    ProviderUnavailable(String),

    #[error("Provider call timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Extracted text is empty")]
    ExtractionEmpty,

    #[error("Document read error: {0}")]
    Read(#[from] std::io::Error),
}

impl PipelineError {
    /// Fatal errors must be surfaced to the caller; every other variant
    /// triggers the heuristic fallback for the current document only.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::UnsupportedFormat(_) | PipelineError::SourceNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_source_errors_are_fatal() {
        assert!(PipelineError::UnsupportedFormat(".odt".into()).is_fatal());
        assert!(PipelineError::SourceNotFound("cv.pdf".into()).is_fatal());
    }

    #[test]
    fn test_provider_errors_are_recoverable() {
        assert!(!PipelineError::ProviderTimeout(30).is_fatal());
        assert!(!PipelineError::MalformedResponse("not json".into()).is_fatal());
        assert!(!PipelineError::ExtractionEmpty.is_fatal());
    }
}
