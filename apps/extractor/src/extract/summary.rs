//! Professional summary extraction — keeps prose, drops stray fragments
//! and anything carrying contact details.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{dedupe, is_meaningful, strip_invisible};

static CONTACT_FRAGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)@|\+?\d|linkedin\.com|github\.com|https?://").unwrap());

/// Keeps a summary line only if it is free of email/phone/URL fragments
/// and is either long enough to be prose (≥20 chars) or ends in terminal
/// punctuation. Duplicates removed preserving order.
pub fn extract_summary(lines: &[&str]) -> Vec<String> {
    let mut kept = Vec::new();
    for line in lines {
        let line = strip_invisible(line);
        if line.is_empty() || CONTACT_FRAGMENT_RE.is_match(&line) {
            continue;
        }
        if line.len() < 20 && !line.ends_with(['.', '!', '?']) {
            continue;
        }
        if is_meaningful(&line) {
            kept.push(line);
        }
    }
    dedupe(kept)
}
