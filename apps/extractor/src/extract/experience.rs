//! Experience extraction — date-range driven, with `Company, Role`
//! splitting on the remainder of the opening line.

use crate::extract::{dates, dedupe, is_all_caps_words, is_meaningful, strip_bullet, strip_invisible};
use crate::models::ExperienceEntry;

pub fn extract_experience(lines: &[&str]) -> Vec<ExperienceEntry> {
    let mut entries: Vec<ExperienceEntry> = Vec::new();
    let mut current: Option<ExperienceEntry> = None;

    for line in lines {
        let line = strip_invisible(line);
        if line.is_empty() {
            continue;
        }

        if let Some((date_range, rest)) = dates::split_date_range(&line) {
            if let Some(entry) = current.take() {
                entries.push(finalize(entry));
            }
            let mut entry = ExperienceEntry {
                date_range,
                ..Default::default()
            };
            if !rest.is_empty() {
                match rest.split_once(',') {
                    Some((company, role)) => {
                        entry.company = company.trim().to_string();
                        entry.role = role.trim().to_string();
                    }
                    None => entry.company = rest,
                }
            }
            current = Some(entry);
        } else if let Some(content) = strip_bullet(&line) {
            if let Some(entry) = current.as_mut() {
                if is_meaningful(&content) {
                    entry.details.push(content);
                }
            }
        } else if let Some(entry) = current.as_mut() {
            if !is_meaningful(&line) {
                continue;
            }
            if is_all_caps_words(&line) {
                // header-caps continuation backfills role, then company
                if entry.role.is_empty() {
                    entry.role = line;
                } else if entry.company.is_empty() {
                    entry.company = line;
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

fn finalize(mut entry: ExperienceEntry) -> ExperienceEntry {
    entry.details = dedupe(entry.details);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_and_role_split_on_first_comma() {
        let entries =
            extract_experience(&["Juin 2024 - Août 2024 : Progiciel System, Développeur backend"]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date_range, "Juin 2024 - Août 2024");
        assert_eq!(entries[0].company, "Progiciel System");
        assert_eq!(entries[0].role, "Développeur backend");
    }

    #[test]
    fn test_remainder_without_comma_is_company() {
        let entries = extract_experience(&["Jan 2020 - Dec 2021: Acme Corp"]);
        assert_eq!(entries[0].company, "Acme Corp");
        assert!(entries[0].role.is_empty());
    }

    #[test]
    fn test_bullets_collect_as_details_deduplicated() {
        let entries = extract_experience(&[
            "Jan 2020 - Dec 2021: Acme Corp, Engineer",
            "- Built the ingestion pipeline",
            "- Built the ingestion pipeline",
            "- Cut query latency in half",
        ]);
        assert_eq!(
            entries[0].details,
            vec!["Built the ingestion pipeline", "Cut query latency in half"]
        );
    }

    #[test]
    fn test_entry_closes_on_next_date_range() {
        let entries = extract_experience(&[
            "Jan 2020 - Dec 2020: Acme Corp, Engineer",
            "- Shipped v1 of the billing system",
            "Jan 2021 - Present: Globex, Senior Engineer",
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].details.len(), 1);
        assert_eq!(entries[1].company, "Globex");
    }

    #[test]
    fn test_all_caps_continuation_backfills_role_then_company() {
        let entries = extract_experience(&["May 2022 - May 2023 :", "DATA ENGINEER"]);
        assert_eq!(entries[0].role, "DATA ENGINEER");
    }

    #[test]
    fn test_noise_fragments_are_dropped() {
        let entries = extract_experience(&["Jan 2020 - Dec 2020: Acme", "- *", "--"]);
        assert!(entries[0].details.is_empty());
    }
}
