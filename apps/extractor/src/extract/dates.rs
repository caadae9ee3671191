//! Date-range recognition shared by the education and experience
//! extractors. An entry opens on `<Month Year> - <Month Year|present>`
//! in English or French, with or without a trailing colon.

use std::sync::LazyLock;

use regex::Regex;

static DATE_RANGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([a-zà-ÿ]+\.?\s+\d{4}\s*[-–—]\s*(?:[a-zà-ÿ]+\.?\s+\d{4}|present|présent))\s*:?\s*(.*)$",
    )
    .unwrap()
});

/// Splits an entry-opening line into the date range (as written) and the
/// remainder after the range and optional colon. `None` when the line
/// does not open an entry.
pub fn split_date_range(line: &str) -> Option<(String, String)> {
    let caps = DATE_RANGE_RE.captures(line.trim())?;
    let range = caps.get(1).map(|m| m.as_str().trim().to_string())?;
    let rest = caps.get(2).map(|m| m.as_str().trim().to_string())?;
    Some((range, rest))
}
