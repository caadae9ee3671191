//! Skills extraction — bullet-aware `Category: a, b; c` parsing with
//! continuation-line support.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{dedupe, is_all_caps_words, strip_bullet, strip_invisible};

static SKILL_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,;/|]").unwrap());

const MIN_SKILL_LEN: usize = 2;

/// Parses the skills section. Bulleted lines may carry a `Category:` label
/// whose text is excluded from the results; the remainder and any
/// non-bulleted continuation line are tokenized on `,;/|`.
pub fn extract_skills(lines: &[&str]) -> Vec<String> {
    let mut skills = Vec::new();

    for line in lines {
        let line = strip_invisible(line);
        if line.is_empty() {
            continue;
        }

        if let Some(content) = strip_bullet(&line) {
            // "Category: skill1, skill2"; the label itself is not a skill.
            let remainder = match content.split_once(':') {
                Some((_category, rest)) => rest.trim().to_string(),
                None => content,
            };
            push_tokens(&remainder, &mut skills);
        } else if !is_all_caps_words(&line) {
            // continuation line without a bullet
            push_tokens(&line, &mut skills);
        }
    }

    dedupe(skills)
}

fn push_tokens(text: &str, out: &mut Vec<String>) {
    for token in SKILL_SPLIT_RE.split(text) {
        let token = token.trim();
        if token.len() >= MIN_SKILL_LEN {
            out.push(token.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bulleted_comma_list() {
        assert_eq!(extract_skills(&["- Python, SQL"]), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_category_label_is_excluded() {
        let skills = extract_skills(&["● Programming Languages: Rust, Go; C++"]);
        assert_eq!(skills, vec!["Rust", "Go", "C++"]);
    }

    #[test]
    fn test_continuation_line_without_bullet() {
        let skills = extract_skills(&["- Databases: PostgreSQL", "Redis, SQLite"]);
        assert_eq!(skills, vec!["PostgreSQL", "Redis", "SQLite"]);
    }

    #[test]
    fn test_single_char_tokens_are_dropped() {
        assert_eq!(extract_skills(&["- C, R, Go"]), vec!["Go"]);
    }

    #[test]
    fn test_pipe_and_slash_separators() {
        assert_eq!(
            extract_skills(&["- Docker | Kubernetes / Helm"]),
            vec!["Docker", "Kubernetes", "Helm"]
        );
    }

    #[test]
    fn test_deduplicated_preserving_first_occurrence() {
        let skills = extract_skills(&["- Rust, SQL", "- SQL, Rust"]);
        assert_eq!(skills, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_all_caps_stray_line_is_ignored() {
        assert!(extract_skills(&["TECHNOLOGIES"]).is_empty());
    }

    #[test]
    fn test_idempotent_on_clean_input() {
        let lines = vec!["- Rust, Go"];
        assert_eq!(extract_skills(&lines), extract_skills(&lines));
    }
}
