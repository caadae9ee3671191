//! Education extraction — entries open on a date-range line; the
//! remainder of that line is split into degree and (parenthesized)
//! institution.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{dates, dedupe, is_all_caps_words, is_meaningful, strip_bullet, strip_invisible};
use crate::models::EducationEntry;

static PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]+)\)").unwrap());

pub fn extract_education(lines: &[&str]) -> Vec<EducationEntry> {
    let mut entries: Vec<EducationEntry> = Vec::new();
    let mut current: Option<EducationEntry> = None;

    for line in lines {
        let line = strip_invisible(line);
        if line.is_empty() {
            continue;
        }

        if let Some((date_range, rest)) = dates::split_date_range(&line) {
            if let Some(entry) = current.take() {
                entries.push(finalize(entry));
            }
            let mut entry = EducationEntry {
                date_range,
                ..Default::default()
            };
            if !rest.is_empty() {
                // institution is assumed to be the parenthesized clause
                if let Some(caps) = PAREN_RE.captures(&rest) {
                    entry.institution = caps[1].trim().to_string();
                    let degree = PAREN_RE.replace_all(&rest, "").trim().to_string();
                    if !degree.is_empty() {
                        entry.degree = degree;
                    }
                } else {
                    entry.degree = rest;
                }
            }
            current = Some(entry);
        } else if let Some(content) = strip_bullet(&line) {
            if let Some(entry) = current.as_mut() {
                if !content.is_empty() {
                    entry.details.push(content);
                }
            }
        } else if let Some(entry) = current.as_mut() {
            if !is_meaningful(&line) {
                continue;
            }
            if is_all_caps_words(&line) {
                // likely a degree/institution continuation in header caps
                if entry.degree.is_empty() {
                    entry.degree = line;
                } else if entry.institution.is_empty() {
                    entry.institution = line;
                }
            } else {
                entry.details.push(line);
            }
        }
    }

    if let Some(entry) = current.take() {
        entries.push(finalize(entry));
    }

    entries
}

fn finalize(mut entry: EducationEntry) -> EducationEntry {
    entry.details = dedupe(entry.details);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_with_parenthesized_institution() {
        let entries = extract_education(&["Sept 2018 - June 2022: BSc CS (MIT)"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date_range, "Sept 2018 - June 2022");
        assert_eq!(entries[0].degree, "BSc CS");
        assert_eq!(entries[0].institution, "MIT");
    }

    #[test]
    fn test_entry_without_parentheses_is_all_degree() {
        let entries = extract_education(&["Sept 2020 - Juin 2022: Licence Informatique"]);
        assert_eq!(entries[0].degree, "Licence Informatique");
        assert!(entries[0].institution.is_empty());
    }

    #[test]
    fn test_bullets_become_details() {
        let entries = extract_education(&[
            "Sept 2018 - June 2022: BSc CS (MIT)",
            "- Coursework: distributed systems",
            "- Dean's list",
        ]);
        assert_eq!(
            entries[0].details,
            vec!["Coursework: distributed systems", "Dean's list"]
        );
    }

    #[test]
    fn test_second_date_range_opens_second_entry() {
        let entries = extract_education(&[
            "Sept 2018 - June 2022: BSc CS (MIT)",
            "Sept 2022 - June 2024: MSc CS (Stanford)",
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].institution, "Stanford");
    }

    #[test]
    fn test_all_caps_continuation_backfills_degree_then_institution() {
        let entries = extract_education(&[
            "Sept 2019 - June 2021 :",
            "MASTER OF SCIENCE",
            "POLYTECHNIQUE",
        ]);
        assert_eq!(entries[0].degree, "MASTER OF SCIENCE");
        assert_eq!(entries[0].institution, "POLYTECHNIQUE");
    }

    #[test]
    fn test_plain_continuation_becomes_detail() {
        let entries = extract_education(&[
            "Sept 2018 - June 2022: BSc CS (MIT)",
            "Graduated with honors in the top decile",
        ]);
        assert_eq!(entries[0].details.len(), 1);
    }

    #[test]
    fn test_lines_before_any_entry_are_ignored() {
        assert!(extract_education(&["- stray bullet"]).is_empty());
    }

    #[test]
    fn test_last_open_entry_is_finalized() {
        let entries = extract_education(&["Jan 2020 - Dec 2020: Bootcamp (Le Wagon)", "- Ruby"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].details, vec!["Ruby"]);
    }
}
