//! Contact extraction. Emails and phones are recognized against the whole
//! document, not just a contact-labeled section — contact details usually
//! precede any header.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{address, dedupe, strip_invisible};
use crate::models::ContactInfo;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());

/// International, NANP, and hyphen/space-separated local phone shapes.
static PHONE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\+?[\d\s\-()]{10,}").unwrap(),
        Regex::new(r"\b\d{3}[\s\-]?\d{3}[\s\-]?\d{4}\b").unwrap(),
        Regex::new(r"\b\d{2}[\s\-]?\d{2}[\s\-]?\d{2}[\s\-]?\d{2}[\s\-]?\d{2}\b").unwrap(),
        Regex::new(r"\b\d{3}[\s\-]\d{4}\b").unwrap(),
    ]
});

static PHONE_JUNK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\d\s+()\-]").unwrap());
static LINKEDIN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linkedin\.com/[^\s]+").unwrap());
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z][a-zà-ÿ]+(?:\s+[A-Z][a-zà-ÿ]+){1,2})$").unwrap());
static TITLED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:Mr\.|Ms\.|Mrs\.|Dr\.|Prof\.)\s+([A-Z][a-zà-ÿ]+(?:\s+[A-Z][a-zà-ÿ]+){1,2})$")
        .unwrap()
});

/// Lines carrying these fragments cannot be the candidate's name line.
const NON_NAME_KEYWORDS: &[&str] = &[
    "email",
    "phone",
    "tél",
    "address",
    "adresse",
    "linkedin",
    "summary",
    "profile",
    "profil",
    "experience",
    "expérience",
    "education",
    "formation",
    "skills",
    "compétences",
    "languages",
    "langues",
    "projects",
    "projets",
];

pub fn extract_contact(text: &str, address_min_score: i32) -> ContactInfo {
    let text = strip_invisible_text(text);

    let emails = dedupe(
        EMAIL_RE
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect(),
    );

    let mut phones = Vec::new();
    for pattern in PHONE_RES.iter() {
        for m in pattern.find_iter(&text) {
            let cleaned = PHONE_JUNK_RE.replace_all(m.as_str(), "").trim().to_string();
            let digits = cleaned.chars().filter(|c| c.is_ascii_digit()).count();
            if digits >= 7 {
                phones.push(cleaned);
            }
        }
    }

    let linkedin = LINKEDIN_RE
        .find(&text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();

    ContactInfo {
        emails,
        phones: dedupe(phones),
        linkedin,
        address: address::extract_address(&text, address_min_score),
        name: extract_candidate_name(&text),
    }
}

/// Scans the first ten lines for a 2–3 token capitalized name shape,
/// skipping anything that carries contact or section keywords. An
/// honorific prefix (`Mr.`, `Dr.`, …) is tolerated and dropped.
pub fn extract_candidate_name(text: &str) -> String {
    for line in text.lines().take(10) {
        let line = strip_invisible(line);
        if line.is_empty() {
            continue;
        }
        let lowered = line.to_lowercase();
        if NON_NAME_KEYWORDS.iter().any(|kw| lowered.contains(kw)) {
            continue;
        }
        if let Some(caps) = NAME_RE.captures(&line) {
            return caps[1].to_string();
        }
        if let Some(caps) = TITLED_NAME_RE.captures(&line) {
            return caps[1].to_string();
        }
    }
    String::new()
}

fn strip_invisible_text(text: &str) -> String {
    text.lines()
        .map(strip_invisible)
        .collect::<Vec<_>>()
        .join("\n")
}
