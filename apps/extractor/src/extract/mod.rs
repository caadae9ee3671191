//! Heuristic field extraction — one module per résumé category, plus the
//! address scorer. Each extractor consumes the lines of its section and
//! returns typed records; re-running any extractor on already-cleaned
//! text yields the same result.

pub mod address;
pub mod contact;
pub mod dates;
pub mod education;
pub mod experience;
pub mod languages;
pub mod projects;
pub mod skills;
pub mod summary;

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::StructuredCv;
use crate::segment::{lines_for, segment, SectionKind};

static ZERO_WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[\u{200B}\u{200C}\u{200D}\u{FEFF}]").unwrap());
static BULLET_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[●○•▪\-*]\s*").unwrap());
static ALL_CAPS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-ZÀ-Þ\s]+$").unwrap());
static NOISE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\s\-_=*]+$").unwrap());

/// Runs the full heuristic path: segmentation, per-section extraction,
/// and the unclassified-bucket fallback.
pub fn extract_cv(text: &str, address_min_score: i32) -> StructuredCv {
    let sections = segment(text);

    let mut cv = StructuredCv {
        contact_info: contact::extract_contact(text, address_min_score),
        professional_summary: summary::extract_summary(&lines_for(
            &sections,
            SectionKind::Summary,
        )),
        skills: skills::extract_skills(&lines_for(&sections, SectionKind::Skills)),
        languages: languages::extract_languages(&lines_for(&sections, SectionKind::Languages)),
        education: education::extract_education(&lines_for(&sections, SectionKind::Education)),
        experience: experience::extract_experience(&lines_for(
            &sections,
            SectionKind::Experience,
        )),
        projects: projects::extract_projects(&lines_for(&sections, SectionKind::Projects)),
    };

    // Unclassified buckets: date-range content reads as experience the
    // segmenter could not label; everything else folds into the summary.
    for section in sections.iter().filter(|s| s.kind == SectionKind::Unclassified) {
        let lines: Vec<&str> = section.lines.iter().map(String::as_str).collect();
        if lines.iter().any(|l| dates::split_date_range(l).is_some()) {
            cv.experience.extend(experience::extract_experience(&lines));
        } else {
            cv.professional_summary
                .extend(lines.iter().map(|l| l.to_string()));
        }
    }
    cv.professional_summary = dedupe(cv.professional_summary);

    cv
}

/// Removes duplicates while preserving first-seen order. Idempotent.
pub fn dedupe(items: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        let key = item.trim().to_string();
        if !key.is_empty() && seen.insert(key.clone()) {
            out.push(key);
        }
    }
    out
}

/// Strips zero-width/invisible formatting characters before any pattern
/// matching.
pub(crate) fn strip_invisible(line: &str) -> String {
    ZERO_WIDTH_RE.replace_all(line, "").trim().to_string()
}

/// Content after a bullet glyph, or `None` for non-bulleted lines.
pub(crate) fn strip_bullet(line: &str) -> Option<String> {
    if BULLET_RE.is_match(line) {
        Some(BULLET_RE.replace(line, "").trim().to_string())
    } else {
        None
    }
}

/// A line made only of uppercase letters and spaces (header-ish
/// continuation, candidate for role/degree backfill).
pub(crate) fn is_all_caps_words(line: &str) -> bool {
    !line.is_empty() && line.chars().any(|c| c.is_alphabetic()) && ALL_CAPS_RE.is_match(line)
}

/// Filters out fragments: too short, or digits/separator glyphs only.
pub(crate) fn is_meaningful(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && !NOISE_RE.is_match(trimmed)
}

/// Uppercases the first letter of each whitespace-separated word and
/// lowercases the rest.
pub(crate) fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
