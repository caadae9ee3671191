//! Reconciliation of a partial AI record with the heuristic record.
//! AI fields win; heuristic values only fill holes.

use tracing::debug;

use crate::models::StructuredCv;

/// Copies heuristic values into empty top-level fields of the AI record.
/// `contact_info` merges at the sub-field level. Fields already present
/// in the AI output are never overwritten.
pub fn merge_partial(ai: &StructuredCv, heuristic: &StructuredCv) -> StructuredCv {
    let mut merged = ai.clone();

    if merged.professional_summary.is_empty() && !heuristic.professional_summary.is_empty() {
        debug!("Filling professional_summary from heuristic output");
        merged.professional_summary = heuristic.professional_summary.clone();
    }
    if merged.skills.is_empty() && !heuristic.skills.is_empty() {
        debug!("Filling skills from heuristic output");
        merged.skills = heuristic.skills.clone();
    }
    if merged.languages.is_empty() && !heuristic.languages.is_empty() {
        debug!("Filling languages from heuristic output");
        merged.languages = heuristic.languages.clone();
    }
    if merged.education.is_empty() && !heuristic.education.is_empty() {
        debug!("Filling education from heuristic output");
        merged.education = heuristic.education.clone();
    }
    if merged.experience.is_empty() && !heuristic.experience.is_empty() {
        debug!("Filling experience from heuristic output");
        merged.experience = heuristic.experience.clone();
    }
    if merged.projects.is_empty() && !heuristic.projects.is_empty() {
        debug!("Filling projects from heuristic output");
        merged.projects = heuristic.projects.clone();
    }

    let contact = &mut merged.contact_info;
    let fallback = &heuristic.contact_info;
    if contact.emails.is_empty() {
        contact.emails = fallback.emails.clone();
    }
    if contact.phones.is_empty() {
        contact.phones = fallback.phones.clone();
    }
    if contact.linkedin.is_empty() {
        contact.linkedin = fallback.linkedin.clone();
    }
    if contact.address.is_empty() {
        contact.address = fallback.address.clone();
    }
    if contact.name.is_empty() {
        contact.name = fallback.name.clone();
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LanguageSkill;

    fn heuristic_cv() -> StructuredCv {
        let mut cv = StructuredCv::default();
        cv.contact_info.emails.push("jane@x.com".to_string());
        cv.contact_info.name = "Jane Doe".to_string();
        cv.skills = vec!["Python".to_string(), "React".to_string()];
        cv.languages.push(LanguageSkill {
            language: "English".to_string(),
            level: "Fluent".to_string(),
        });
        cv
    }

    #[test]
    fn test_nonempty_ai_field_is_never_overwritten() {
        let mut ai = StructuredCv::default();
        ai.skills = vec!["Python".to_string()];
        let merged = merge_partial(&ai, &heuristic_cv());
        assert_eq!(merged.skills, vec!["Python"]);
    }

    #[test]
    fn test_empty_ai_fields_are_filled_verbatim() {
        let ai = StructuredCv::default();
        let merged = merge_partial(&ai, &heuristic_cv());
        assert_eq!(merged.skills, vec!["Python", "React"]);
        assert_eq!(merged.languages.len(), 1);
    }

    #[test]
    fn test_contact_info_merges_per_subfield() {
        let mut ai = StructuredCv::default();
        ai.contact_info.name = "J. Doe".to_string();
        let merged = merge_partial(&ai, &heuristic_cv());
        // AI name kept, heuristic emails fill the hole
        assert_eq!(merged.contact_info.name, "J. Doe");
        assert_eq!(merged.contact_info.emails, vec!["jane@x.com"]);
    }

    #[test]
    fn test_merge_with_empty_heuristic_is_identity() {
        let mut ai = StructuredCv::default();
        ai.skills = vec!["Rust".to_string()];
        let merged = merge_partial(&ai, &StructuredCv::default());
        assert_eq!(merged, ai);
    }
}
