//! Validation — scores a structured record against plausibility
//! heuristics to decide whether a provider's output is trustworthy.
//! Failure is never fatal; it routes the document to the heuristic path.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{StructuredCv, ValidationChecks, ValidationReport};

/// Stand-in phrases a provider emits when it failed to extract real data.
const DUMMY_INDICATORS: &[&str] = &[
    "n/a",
    "no information",
    "not available",
    "sample",
    "example",
    "placeholder",
    "dummy",
    "test",
    "lorem ipsum",
    "unknown",
    "tbd",
    "to be determined",
];

const MIN_DUMMY_STRING_LEN: usize = 5;

const WEIGHT_NAME: f64 = 0.2;
const WEIGHT_MEANINGFUL: f64 = 0.3;
const WEIGHT_REQUIRED_SECTIONS: f64 = 0.3;
const WEIGHT_LENGTH: f64 = 0.1;
const WEIGHT_NO_DUMMY: f64 = 0.1;

static NAME_PATTERN_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b[A-Z][a-z]+ [A-Z][a-z]+\b",
        r"\b[A-Z]\. [A-Z][a-z]+\b",
        r"\b[A-Z][a-z]+ [A-Z]\.\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Runs the five independent checks, computes the weighted score, and
/// passes iff score >= the configured threshold AND no dummy content.
pub fn validate(cv: &StructuredCv, config: &Config) -> ValidationReport {
    let checks = ValidationChecks {
        has_name: check_name_present(cv),
        has_meaningful_content: check_meaningful_content(cv),
        has_required_sections: !cv.skills.is_empty()
            || !cv.experience.is_empty()
            || !cv.education.is_empty(),
        content_length_sufficient: cv.content_length() >= config.min_content_length,
        no_dummy_content: check_no_dummy_content(cv),
    };

    let score = validation_score(&checks);
    let passed = score >= config.validation_pass_score && checks.no_dummy_content;

    let reason = if passed {
        "AI output passed validation".to_string()
    } else {
        failure_reason(&checks, score)
    };

    ValidationReport {
        passed,
        reason,
        checks,
        score,
    }
}

fn validation_score(checks: &ValidationChecks) -> f64 {
    let mut score = 0.0;
    if checks.has_name {
        score += WEIGHT_NAME;
    }
    if checks.has_meaningful_content {
        score += WEIGHT_MEANINGFUL;
    }
    if checks.has_required_sections {
        score += WEIGHT_REQUIRED_SECTIONS;
    }
    if checks.content_length_sufficient {
        score += WEIGHT_LENGTH;
    }
    if checks.no_dummy_content {
        score += WEIGHT_NO_DUMMY;
    }
    score
}

/// Enumerates every failing sub-check in the human-readable reason.
fn failure_reason(checks: &ValidationChecks, score: f64) -> String {
    let mut reasons = Vec::new();
    if !checks.has_name {
        reasons.push("missing name");
    }
    if !checks.has_meaningful_content {
        reasons.push("insufficient meaningful content");
    }
    if !checks.has_required_sections {
        reasons.push("missing required sections (skills/experience/education)");
    }
    if !checks.content_length_sufficient {
        reasons.push("content too short");
    }
    if !checks.no_dummy_content {
        reasons.push("contains dummy/placeholder content");
    }
    format!(
        "Validation failed: {} (score: {score:.2})",
        reasons.join(", ")
    )
}

/// Name in contact info, or a name-shaped token in the summary.
fn check_name_present(cv: &StructuredCv) -> bool {
    let name = cv.contact_info.name.trim();
    if name.len() > 1 && !is_dummy_content(name) {
        return true;
    }
    cv.professional_summary
        .iter()
        .any(|line| NAME_PATTERN_RES.iter().any(|re| re.is_match(line)))
}

/// At least one field holds non-trivial data, not just empty structures.
fn check_meaningful_content(cv: &StructuredCv) -> bool {
    let contact = &cv.contact_info;
    if !contact.emails.is_empty() || !contact.phones.is_empty() {
        return true;
    }
    if contact.name.trim().len() > 2 || contact.address.trim().len() > 2 {
        return true;
    }
    if cv
        .professional_summary
        .iter()
        .chain(cv.skills.iter())
        .any(|s| s.trim().len() > 10)
    {
        return true;
    }
    if cv
        .languages
        .iter()
        .any(|l| l.language.trim().len() > 5 || l.level.trim().len() > 5)
    {
        return true;
    }
    if cv.education.iter().any(|e| {
        e.date_range.trim().len() > 5
            || e.degree.trim().len() > 5
            || e.institution.trim().len() > 5
            || !e.details.is_empty()
    }) {
        return true;
    }
    if cv.experience.iter().any(|e| {
        e.date_range.trim().len() > 5
            || e.company.trim().len() > 5
            || e.role.trim().len() > 5
            || !e.details.is_empty()
    }) {
        return true;
    }
    cv.projects
        .iter()
        .any(|p| p.title.trim().len() > 5 || p.description.trim().len() > 5)
}

/// Walks every non-empty text field; one dummy string poisons the record.
fn check_no_dummy_content(cv: &StructuredCv) -> bool {
    !cv.collect_strings()
        .iter()
        .filter(|s| !s.trim().is_empty())
        .any(|s| is_dummy_content(s))
}

/// Dummy: a known stop-phrase in a short string, any string under five
/// characters, or degenerate repetition (fewer than 3 distinct tokens
/// across more than 5).
pub fn is_dummy_content(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.len() < MIN_DUMMY_STRING_LEN {
        return true;
    }

    let lowered = trimmed.to_lowercase();
    if trimmed.len() < 20 && DUMMY_INDICATORS.iter().any(|ind| lowered.contains(ind)) {
        return true;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let distinct: HashSet<&str> = tokens.iter().copied().collect();
    if distinct.len() < 3 && tokens.len() > 5 {
        return true;
    }

    false
}

/// Observational content-preservation report: how much of the raw text
/// made it into the structured record. Never gates validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreservationReport {
    pub original_length: usize,
    pub structured_length: usize,
    /// min(1.0, structured / original)
    pub score: f64,
    pub missing_content_warning: bool,
}

const PRESERVATION_WARNING_THRESHOLD: f64 = 0.3;

pub fn content_preservation(cv: &StructuredCv, raw_text: &str) -> PreservationReport {
    let original_length = raw_text.len();
    let structured_length = cv.content_length();
    let score = if original_length > 0 {
        (structured_length as f64 / original_length as f64).min(1.0)
    } else {
        0.0
    };
    PreservationReport {
        original_length,
        structured_length,
        score,
        missing_content_warning: score < PRESERVATION_WARNING_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EducationEntry, ExperienceEntry};

    fn rich_cv() -> StructuredCv {
        let mut cv = StructuredCv::default();
        cv.contact_info.name = "Jane Doe".to_string();
        cv.contact_info.emails.push("jane@x.com".to_string());
        cv.skills = vec!["Python programming".to_string(), "Kubernetes".to_string()];
        cv.professional_summary = vec![
            "Backend engineer with eight years of experience building data-heavy platforms."
                .to_string(),
            "Led migrations of monolithic billing systems to event-driven services.".to_string(),
        ];
        cv.experience.push(ExperienceEntry {
            date_range: "Jan 2020 - Dec 2023".to_string(),
            company: "Acme Corp".to_string(),
            role: "Senior Engineer".to_string(),
            details: vec!["Designed the ingestion pipeline for 2M daily events".to_string()],
        });
        cv.education.push(EducationEntry {
            date_range: "Sept 2012 - June 2016".to_string(),
            degree: "BSc Computer Science".to_string(),
            institution: "Massachusetts Institute of Technology".to_string(),
            details: vec![],
        });
        cv
    }

    #[test]
    fn test_rich_record_passes() {
        let report = validate(&rich_cv(), &Config::default());
        assert!(report.passed, "reason: {}", report.reason);
        assert!(report.score >= 0.7);
    }

    #[test]
    fn test_empty_record_fails_with_enumerated_reasons() {
        let report = validate(&StructuredCv::default(), &Config::default());
        assert!(!report.passed);
        assert!(report.reason.contains("missing name"));
        assert!(report.reason.contains("insufficient meaningful content"));
        assert!(report.reason.contains("missing required sections"));
        assert!(report.reason.contains("content too short"));
    }

    #[test]
    fn test_dummy_name_only_record_fails() {
        // provider answered with a placeholder instead of real data
        let mut cv = StructuredCv::default();
        cv.contact_info.name = "N/A".to_string();
        let report = validate(&cv, &Config::default());
        assert!(!report.passed);
        assert!(!report.checks.no_dummy_content);
        assert!(report.reason.contains("dummy"));
    }

    #[test]
    fn test_dummy_content_vetoes_even_a_high_score() {
        let mut cv = rich_cv();
        cv.skills.push("lorem ipsum".to_string());
        let report = validate(&cv, &Config::default());
        assert!(!report.passed);
        assert!(!report.checks.no_dummy_content);
    }

    #[test]
    fn test_adding_email_strictly_increases_score() {
        let empty = StructuredCv::default();
        let before = validate(&empty, &Config::default());

        let mut with_email = StructuredCv::default();
        with_email.contact_info.emails.push("jane@x.com".to_string());
        let after = validate(&with_email, &Config::default());

        assert!(!before.checks.has_meaningful_content);
        assert!(after.checks.has_meaningful_content);
        assert!(after.score > before.score);
    }

    #[test]
    fn test_name_inferable_from_summary() {
        let mut cv = StructuredCv::default();
        cv.professional_summary =
            vec!["John Smith is a data engineer focused on streaming systems.".to_string()];
        let report = validate(&cv, &Config::default());
        assert!(report.checks.has_name);
    }

    #[test]
    fn test_is_dummy_stop_phrases() {
        assert!(is_dummy_content("n/a"));
        assert!(is_dummy_content("No information"));
        assert!(is_dummy_content("lorem ipsum"));
        assert!(is_dummy_content("null"));
    }

    #[test]
    fn test_is_dummy_short_strings() {
        assert!(is_dummy_content("ab"));
        assert!(is_dummy_content(""));
    }

    #[test]
    fn test_is_dummy_degenerate_repetition() {
        assert!(is_dummy_content("data data data data data data"));
        assert!(!is_dummy_content("worked on data pipelines daily"));
    }

    #[test]
    fn test_long_strings_containing_indicator_are_fine() {
        assert!(!is_dummy_content(
            "Tested and deployed sample-efficient training jobs"
        ));
    }

    #[test]
    fn test_pass_threshold_is_configurable() {
        let mut cv = rich_cv();
        cv.contact_info.name.clear(); // drops the 0.2 name weight
        assert!(validate(&cv, &Config::default()).passed);

        let mut strict = Config::default();
        strict.validation_pass_score = 0.95;
        assert!(!validate(&cv, &strict).passed);
    }

    #[test]
    fn test_preservation_report_warns_on_thin_output() {
        let raw = "x".repeat(1000);
        let report = content_preservation(&StructuredCv::default(), &raw);
        assert_eq!(report.structured_length, 0);
        assert!(report.missing_content_warning);
    }

    #[test]
    fn test_preservation_score_caps_at_one() {
        let cv = rich_cv();
        let report = content_preservation(&cv, "tiny");
        assert_eq!(report.score, 1.0);
    }
}
