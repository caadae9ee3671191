//! The two-stage pipeline orchestrator.
//!
//! `LOADING → TEXT_EXTRACTED → AI_ATTEMPTED → {AI_VALID, AI_INVALID} → DONE`.
//! Only `UnsupportedFormat`/`SourceNotFound` reach the caller; every other
//! failure is absorbed into the diagnostics and the heuristic fallback.
//! No raw error ever propagates past this boundary.

use std::path::Path;

use tracing::{info, warn};

use crate::config::Config;
use crate::errors::PipelineError;
use crate::extract::extract_cv;
use crate::loader::load_document;
use crate::merge::merge_partial;
use crate::models::{ProcessingResult, Provenance, StructuredCv};
use crate::provider::prompts::structuring_prompt;
use crate::provider::ActiveProvider;
use crate::repair::{repair_json, salvage_partial};
use crate::validate::{content_preservation, validate};

pub struct Pipeline {
    provider: ActiveProvider,
    config: Config,
}

impl Pipeline {
    /// The provider-selection result is computed once at process start
    /// and shared read-only across every document.
    pub fn new(provider: ActiveProvider, config: Config) -> Self {
        Pipeline { provider, config }
    }

    /// Processes one document from disk. `UnsupportedFormat` and
    /// `SourceNotFound` are surfaced; any other loading fault terminates
    /// with provenance `error` and an empty record.
    pub async fn process_file(&self, path: &Path) -> Result<ProcessingResult, PipelineError> {
        match load_document(path) {
            Ok(text) => Ok(self.process_text(&text).await),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!("Processing failed during load: {e}");
                Ok(ProcessingResult::new(
                    StructuredCv::default(),
                    Provenance::Error,
                    vec![format!("Processing failed: {e}")],
                    String::new(),
                ))
            }
        }
    }

    /// Processes already-extracted raw text through both paths.
    pub async fn process_text(&self, raw_text: &str) -> ProcessingResult {
        let mut diagnostics = Vec::new();
        diagnostics.push(format!(
            "Raw text extracted: {} characters",
            raw_text.len()
        ));

        if raw_text.trim().is_empty() {
            diagnostics.push(format!(
                "{}; skipping AI structuring",
                PipelineError::ExtractionEmpty
            ));
            return self.finish_heuristic(raw_text, diagnostics);
        }

        match self.attempt_ai(raw_text, &mut diagnostics).await {
            Some(ai_cv) => {
                let missing = ai_cv.missing_sections();
                if missing.is_empty() {
                    info!("AI structuring successful and complete");
                    diagnostics
                        .push(format!("Processing completed - Source: {}", Provenance::Ai));
                    self.finish(ai_cv, Provenance::Ai, diagnostics, raw_text)
                } else {
                    diagnostics.push(format!(
                        "Partial AI output detected (missing: {}), merging with heuristic parser",
                        missing.join(", ")
                    ));
                    let heuristic = extract_cv(raw_text, self.config.address_min_score);
                    let merged = merge_partial(&ai_cv, &heuristic);
                    diagnostics.push(format!(
                        "Processing completed - Source: {}",
                        Provenance::AiHeuristicMerge
                    ));
                    self.finish(merged, Provenance::AiHeuristicMerge, diagnostics, raw_text)
                }
            }
            None => self.finish_heuristic(raw_text, diagnostics),
        }
    }

    /// The AI leg: generate, repair, validate. Returns a validated record
    /// or `None` after pushing the failure diagnostic. Never an error.
    async fn attempt_ai(
        &self,
        raw_text: &str,
        diagnostics: &mut Vec<String>,
    ) -> Option<StructuredCv> {
        let backend = match &self.provider {
            ActiveProvider::Remote(backend) => backend,
            ActiveProvider::Heuristic => {
                diagnostics.push(
                    "No structuring provider active, using heuristic parser".to_string(),
                );
                return None;
            }
        };

        let prompt = structuring_prompt(raw_text);
        let response = match backend.generate(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                let failure = if e.is_timeout() {
                    PipelineError::ProviderTimeout(self.config.generate_timeout_secs)
                } else {
                    PipelineError::ProviderUnavailable(e.to_string())
                };
                warn!("AI structuring failed: {failure}");
                diagnostics.push(format!("AI structuring failed: {failure}"));
                return None;
            }
        };
        diagnostics.push(format!(
            "AI structuring completed: {} characters",
            response.len()
        ));

        let payload = match repair_json(&response) {
            Ok(value) => value,
            Err(e) => {
                diagnostics.push(format!("Response repair failed: {e}"));
                match salvage_partial(&response) {
                    Some(cv) => {
                        diagnostics
                            .push("Salvaged partial fields from malformed response".to_string());
                        return self.gate_with_validation(cv, diagnostics);
                    }
                    None => return None,
                }
            }
        };

        self.gate_with_validation(StructuredCv::from_value(payload), diagnostics)
    }

    fn gate_with_validation(
        &self,
        cv: StructuredCv,
        diagnostics: &mut Vec<String>,
    ) -> Option<StructuredCv> {
        let report = validate(&cv, &self.config);
        diagnostics.push(format!("AI validation: {}", report.reason));
        if report.passed {
            Some(cv)
        } else {
            warn!("AI output failed validation: {}", report.reason);
            None
        }
    }

    fn finish_heuristic(&self, raw_text: &str, mut diagnostics: Vec<String>) -> ProcessingResult {
        diagnostics.push("Using heuristic parser".to_string());
        let cv = extract_cv(raw_text, self.config.address_min_score);
        diagnostics.push(format!(
            "Processing completed - Source: {}",
            Provenance::Heuristic
        ));
        self.finish(cv, Provenance::Heuristic, diagnostics, raw_text)
    }

    fn finish(
        &self,
        cv: StructuredCv,
        provenance: Provenance,
        mut diagnostics: Vec<String>,
        raw_text: &str,
    ) -> ProcessingResult {
        let preservation = content_preservation(&cv, raw_text);
        diagnostics.push(format!(
            "Content preservation score: {:.2}",
            preservation.score
        ));
        if preservation.missing_content_warning {
            warn!(
                "Content preservation low ({:.2}), structured output may be missing data",
                preservation.score
            );
        }
        ProcessingResult::new(cv, provenance, diagnostics, raw_text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{GenerateBackend, ProviderError};
    use async_trait::async_trait;
    use std::sync::Arc;

    const SCENARIO: &str =
        "Jane Doe\njane@x.com\n555-0100\nSKILLS\n- Python, SQL\nEDUCATION\nSept 2018 - June 2022: BSc CS (MIT)";

    /// Canned backend: probes always succeed, generation replays a fixture.
    struct CannedBackend {
        response: Result<&'static str, ()>,
    }

    #[async_trait]
    impl GenerateBackend for CannedBackend {
        fn name(&self) -> &'static str {
            "canned"
        }
        async fn probe(&self) -> Result<(), ProviderError> {
            Ok(())
        }
        async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
            match self.response {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(ProviderError::EmptyContent),
            }
        }
    }

    fn pipeline_with(response: Result<&'static str, ()>) -> Pipeline {
        Pipeline::new(
            ActiveProvider::Remote(Arc::new(CannedBackend { response })),
            Config::default(),
        )
    }

    const FULL_AI_RESPONSE: &str = r#"{
        "contact_info": {"emails": ["jane.doe@acmemail.com"], "phones": ["+1 555 010 9988"],
            "linkedin": "linkedin.com/in/janedoe",
            "address": "123 Main Street, Springfield, IL 62701", "name": "Jane Doe"},
        "professional_summary": ["Backend engineer with eight years of experience building data platforms."],
        "skills": ["Python programming", "Distributed systems", "PostgreSQL"],
        "languages": [{"language": "English", "level": "Fluent"}],
        "education": [{"date_range": "Sept 2012 - June 2016", "degree": "BSc Computer Science",
            "institution": "State University", "details": ["Graduated with honors"]}],
        "experience": [{"date_range": "Jan 2020 - Dec 2023", "company": "Acme Corp",
            "role": "Senior Engineer", "details": ["Designed the ingestion pipeline for events"]}],
        "projects": [{"title": "Chess engine", "description": "UCI-compatible engine written in Rust"}]
    }"#;

    const PARTIAL_AI_RESPONSE: &str = r#"{
        "contact_info": {"name": "Jane Doe"},
        "professional_summary": ["Backend engineer with eight years of experience building data platforms."],
        "skills": ["Python programming", "Distributed systems", "PostgreSQL"]
    }"#;

    #[tokio::test]
    async fn test_heuristic_provider_yields_heuristic_provenance() {
        let pipeline = Pipeline::new(ActiveProvider::Heuristic, Config::default());
        let result = pipeline.process_text(SCENARIO).await;
        assert_eq!(result.provenance, Provenance::Heuristic);
        assert_eq!(result.cv.contact_info.emails, vec!["jane@x.com"]);
        assert_eq!(result.cv.skills, vec!["Python", "SQL"]);
        assert_eq!(result.raw_text, SCENARIO);
    }

    #[tokio::test]
    async fn test_complete_valid_ai_output_has_ai_provenance() {
        let result = pipeline_with(Ok(FULL_AI_RESPONSE))
            .process_text(SCENARIO)
            .await;
        assert_eq!(result.provenance, Provenance::Ai);
        assert_eq!(result.cv.contact_info.name, "Jane Doe");
        assert_eq!(result.cv.skills[0], "Python programming");
    }

    #[tokio::test]
    async fn test_partial_valid_ai_output_merges_with_heuristic() {
        let result = pipeline_with(Ok(PARTIAL_AI_RESPONSE))
            .process_text(SCENARIO)
            .await;
        assert_eq!(result.provenance, Provenance::AiHeuristicMerge);
        // AI fields kept
        assert_eq!(result.cv.skills[0], "Python programming");
        // holes filled from the heuristic record
        assert_eq!(result.cv.education.len(), 1);
        assert_eq!(result.cv.education[0].institution, "MIT");
        assert_eq!(result.cv.contact_info.emails, vec!["jane@x.com"]);
    }

    #[tokio::test]
    async fn test_dummy_ai_output_falls_back_to_heuristic() {
        let result = pipeline_with(Ok(r#"{"contact_info": {"name": "N/A"}}"#))
            .process_text(SCENARIO)
            .await;
        assert_eq!(result.provenance, Provenance::Heuristic);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.contains("Validation failed")));
    }

    #[tokio::test]
    async fn test_unparseable_ai_output_falls_back_to_heuristic() {
        let result = pipeline_with(Ok("I could not parse this CV, sorry!"))
            .process_text(SCENARIO)
            .await;
        assert_eq!(result.provenance, Provenance::Heuristic);
        assert_eq!(result.cv.skills, vec!["Python", "SQL"]);
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_heuristic() {
        let result = pipeline_with(Err(())).process_text(SCENARIO).await;
        assert_eq!(result.provenance, Provenance::Heuristic);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.contains("AI structuring failed")));
    }

    #[tokio::test]
    async fn test_empty_text_is_absorbed_not_raised() {
        let pipeline = Pipeline::new(ActiveProvider::Heuristic, Config::default());
        let result = pipeline.process_text("").await;
        assert_eq!(result.provenance, Provenance::Heuristic);
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.contains("Extracted text is empty")));
    }

    #[tokio::test]
    async fn test_fatal_load_errors_surface_to_caller() {
        let pipeline = Pipeline::new(ActiveProvider::Heuristic, Config::default());
        let err = pipeline
            .process_file(Path::new("/nonexistent/cv.pdf"))
            .await
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_diagnostics_are_ordered_and_complete() {
        let result = pipeline_with(Ok(FULL_AI_RESPONSE))
            .process_text(SCENARIO)
            .await;
        assert!(result.diagnostics[0].starts_with("Raw text extracted"));
        assert!(result
            .diagnostics
            .iter()
            .any(|d| d.contains("AI validation: AI output passed validation")));
    }
}
