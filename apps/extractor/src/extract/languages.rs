//! Language extraction — `<Name> <: | - | –> <Level>` pairs, bulleted or
//! bare, title-cased on the way out.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{strip_bullet, strip_invisible, title_case};
use crate::models::LanguageSkill;

static LANGUAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-zÀ-ÿ]+)\s*[:\-–]\s*([A-Za-zÀ-ÿ][A-Za-zÀ-ÿ ]*)$").unwrap());

pub fn extract_languages(lines: &[&str]) -> Vec<LanguageSkill> {
    let mut languages = Vec::new();

    for line in lines {
        let line = strip_invisible(line);
        if line.is_empty() {
            continue;
        }
        let content = strip_bullet(&line).unwrap_or(line);
        if let Some(caps) = LANGUAGE_RE.captures(&content) {
            let language = title_case(caps[1].trim());
            let level = title_case(caps[2].trim());
            if language.len() > 1 && !level.is_empty() {
                languages.push(LanguageSkill { language, level });
            }
        }
    }

    languages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_separated_pair() {
        let langs = extract_languages(&["- English: Fluent"]);
        assert_eq!(langs.len(), 1);
        assert_eq!(langs[0].language, "English");
        assert_eq!(langs[0].level, "Fluent");
    }

    #[test]
    fn test_bare_line_with_dash_separator() {
        let langs = extract_languages(&["French - Native speaker"]);
        assert_eq!(langs[0].language, "French");
        assert_eq!(langs[0].level, "Native Speaker");
    }

    #[test]
    fn test_en_dash_and_accents() {
        let langs = extract_languages(&["● Français – Courant"]);
        assert_eq!(langs[0].language, "Français");
        assert_eq!(langs[0].level, "Courant");
    }

    #[test]
    fn test_output_is_title_cased() {
        let langs = extract_languages(&["- SPANISH: INTERMEDIATE"]);
        assert_eq!(langs[0].language, "Spanish");
        assert_eq!(langs[0].level, "Intermediate");
    }

    #[test]
    fn test_non_matching_lines_are_ignored() {
        assert!(extract_languages(&["Fluent in many tongues"]).is_empty());
        assert!(extract_languages(&["English"]).is_empty());
    }
}
