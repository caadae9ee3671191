use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::cv::StructuredCv;

/// Which extraction path produced the final record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provenance {
    #[serde(rename = "heuristic")]
    Heuristic,
    #[serde(rename = "ai")]
    Ai,
    #[serde(rename = "ai+heuristic-merge")]
    AiHeuristicMerge,
    #[serde(rename = "error")]
    Error,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Provenance::Heuristic => "heuristic",
            Provenance::Ai => "ai",
            Provenance::AiHeuristicMerge => "ai+heuristic-merge",
            Provenance::Error => "error",
        };
        f.write_str(tag)
    }
}

/// The five independent validation sub-checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationChecks {
    pub has_name: bool,
    pub has_meaningful_content: bool,
    pub has_required_sections: bool,
    pub content_length_sufficient: bool,
    pub no_dummy_content: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub passed: bool,
    pub reason: String,
    pub checks: ValidationChecks,
    /// Weighted score in [0, 1].
    pub score: f64,
}

/// The immutable per-document outcome handed to the downstream
/// persistence/API layer. Created once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub cv: StructuredCv,
    pub provenance: Provenance,
    /// Ordered, human-readable stage log (also emitted via tracing).
    pub diagnostics: Vec<String>,
    pub raw_text: String,
    pub processed_at: DateTime<Utc>,
}

impl ProcessingResult {
    pub fn new(
        cv: StructuredCv,
        provenance: Provenance,
        diagnostics: Vec<String>,
        raw_text: String,
    ) -> Self {
        ProcessingResult {
            cv,
            provenance,
            diagnostics,
            raw_text,
            processed_at: Utc::now(),
        }
    }
}
