#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Contact details. All fields default to empty (never null/absent) so
/// partial provider payloads deserialize losslessly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub linkedin: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
            && self.phones.is_empty()
            && self.linkedin.is_empty()
            && self.address.is_empty()
            && self.name.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    /// Free-text detail lines only, never a mixed-type container.
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSkill {
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub level: String,
}

/// The canonical structured record. Both extraction paths (heuristic and
/// AI) converge to this exact shape before merge or hand-off downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredCv {
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub professional_summary: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

pub const SECTION_NAMES: [&str; 7] = [
    "contact_info",
    "professional_summary",
    "skills",
    "languages",
    "education",
    "experience",
    "projects",
];

impl StructuredCv {
    /// Deserializes a provider payload after normalizing legacy shapes.
    /// Unknown keys are ignored; missing keys default to empty.
    pub fn from_value(value: Value) -> Self {
        let normalized = normalize_payload(value);
        serde_json::from_value(normalized).unwrap_or_default()
    }

    /// Names of top-level fields that are empty. A non-empty result means
    /// the record is partial and a merge candidate.
    pub fn missing_sections(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.contact_info.is_empty() {
            missing.push("contact_info");
        }
        if self.professional_summary.is_empty() {
            missing.push("professional_summary");
        }
        if self.skills.is_empty() {
            missing.push("skills");
        }
        if self.languages.is_empty() {
            missing.push("languages");
        }
        if self.education.is_empty() {
            missing.push("education");
        }
        if self.experience.is_empty() {
            missing.push("experience");
        }
        if self.projects.is_empty() {
            missing.push("projects");
        }
        missing
    }

    pub fn is_partial(&self) -> bool {
        !self.missing_sections().is_empty()
    }

    /// Every text field in the record, in a stable order. Drives the
    /// validator's dummy-content walk and the length checks.
    pub fn collect_strings(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        out.extend(self.contact_info.emails.iter().map(String::as_str));
        out.extend(self.contact_info.phones.iter().map(String::as_str));
        for s in [
            &self.contact_info.linkedin,
            &self.contact_info.address,
            &self.contact_info.name,
        ] {
            if !s.is_empty() {
                out.push(s);
            }
        }
        out.extend(self.professional_summary.iter().map(String::as_str));
        out.extend(self.skills.iter().map(String::as_str));
        for lang in &self.languages {
            out.push(&lang.language);
            out.push(&lang.level);
        }
        for edu in &self.education {
            for s in [&edu.date_range, &edu.degree, &edu.institution] {
                if !s.is_empty() {
                    out.push(s);
                }
            }
            out.extend(edu.details.iter().map(String::as_str));
        }
        for exp in &self.experience {
            for s in [&exp.date_range, &exp.company, &exp.role] {
                if !s.is_empty() {
                    out.push(s);
                }
            }
            out.extend(exp.details.iter().map(String::as_str));
        }
        for project in &self.projects {
            if !project.title.is_empty() {
                out.push(&project.title);
            }
            if !project.description.is_empty() {
                out.push(&project.description);
            }
        }
        out
    }

    /// Aggregated character count across every text field.
    pub fn content_length(&self) -> usize {
        self.collect_strings().iter().map(|s| s.len()).sum()
    }
}

/// Folds legacy and sloppy provider shapes into the canonical schema
/// before serde: singular `email`/`phone` keys become entries of the
/// plural arrays, nulls become empty defaults, scalar fields are
/// stringified, and non-object items are dropped from entry lists.
fn normalize_payload(mut value: Value) -> Value {
    if let Some(root) = value.as_object_mut() {
        if let Some(Value::Object(contact)) = root.get_mut("contact_info") {
            for (singular, plural) in [("email", "emails"), ("phone", "phones")] {
                let single = contact
                    .get(singular)
                    .and_then(|v| v.as_str())
                    .filter(|s| !s.is_empty())
                    .map(String::from);
                if let Some(single) = single {
                    let list = contact
                        .entry(plural)
                        .or_insert_with(|| Value::Array(vec![]));
                    if let Value::Array(items) = list {
                        if !items.iter().any(|v| v.as_str() == Some(single.as_str())) {
                            items.push(Value::String(single));
                        }
                    }
                }
            }
            for key in ["emails", "phones"] {
                if let Some(v) = contact.get_mut(key) {
                    *v = normalize_string_array(v.take());
                }
            }
            for key in ["linkedin", "address", "name"] {
                if let Some(v) = contact.get_mut(key) {
                    stringify_scalar(v);
                }
            }
        }

        for key in ["professional_summary", "skills"] {
            if let Some(v) = root.get_mut(key) {
                *v = normalize_string_array(v.take());
            }
        }

        for key in ["languages", "education", "experience", "projects"] {
            if let Some(v) = root.get_mut(key) {
                *v = normalize_entry_array(v.take());
            }
        }
    }

    value
}

/// Any non-array becomes an empty array; nulls are dropped and non-string
/// items stringified.
fn normalize_string_array(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(|v| match v {
                    Value::String(_) => v,
                    other => Value::String(other.to_string()),
                })
                .collect(),
        ),
        _ => Value::Array(vec![]),
    }
}

/// Keeps only object items; inside each, scalar fields are stringified
/// (nulls become empty strings) and `details` is normalized to a string
/// array.
fn normalize_entry_array(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| v.is_object())
                .map(|mut entry| {
                    if let Some(obj) = entry.as_object_mut() {
                        let keys: Vec<String> = obj.keys().cloned().collect();
                        for key in keys {
                            if key == "details" {
                                if let Some(v) = obj.get_mut(&key) {
                                    *v = normalize_string_array(v.take());
                                }
                            } else if let Some(v) = obj.get_mut(&key) {
                                if !v.is_object() && !v.is_array() {
                                    stringify_scalar(v);
                                }
                            }
                        }
                    }
                    entry
                })
                .collect(),
        ),
        _ => Value::Array(vec![]),
    }
}

fn stringify_scalar(value: &mut Value) {
    match value {
        Value::String(_) | Value::Object(_) | Value::Array(_) => {}
        Value::Null => *value = Value::String(String::new()),
        ref other => *value = Value::String(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_has_all_seven_sections_empty() {
        let cv = StructuredCv::default();
        assert_eq!(cv.missing_sections().len(), 7);
        assert!(cv.is_partial());
    }

    #[test]
    fn test_serialized_output_has_exactly_seven_keys() {
        let cv = StructuredCv::default();
        let value = serde_json::to_value(&cv).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        for key in SECTION_NAMES {
            assert!(obj.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn test_from_value_tolerates_missing_and_unknown_keys() {
        let cv = StructuredCv::from_value(json!({
            "skills": ["Rust", "SQL"],
            "additional_info": ["ignored"]
        }));
        assert_eq!(cv.skills, vec!["Rust", "SQL"]);
        assert!(cv.contact_info.is_empty());
        assert!(cv.education.is_empty());
    }

    #[test]
    fn test_from_value_folds_singular_email_and_phone() {
        let cv = StructuredCv::from_value(json!({
            "contact_info": {
                "email": "jane@x.com",
                "phone": "555-0100",
                "emails": ["jane@x.com"]
            }
        }));
        assert_eq!(cv.contact_info.emails, vec!["jane@x.com"]);
        assert_eq!(cv.contact_info.phones, vec!["555-0100"]);
    }

    #[test]
    fn test_from_value_stringifies_non_string_details() {
        let cv = StructuredCv::from_value(json!({
            "experience": [{
                "date_range": "Jan 2020 - Jan 2021",
                "company": "Acme",
                "details": ["shipped", 42]
            }]
        }));
        assert_eq!(cv.experience[0].details, vec!["shipped", "42"]);
    }

    #[test]
    fn test_from_value_tolerates_nulls_everywhere() {
        let cv = StructuredCv::from_value(json!({
            "skills": null,
            "contact_info": {"name": null, "emails": null, "linkedin": null},
            "experience": [{"date_range": null, "company": "Acme Corp", "details": null}],
            "projects": null
        }));
        assert!(cv.skills.is_empty());
        assert_eq!(cv.contact_info.name, "");
        assert_eq!(cv.experience[0].company, "Acme Corp");
        assert_eq!(cv.experience[0].date_range, "");
        assert!(cv.experience[0].details.is_empty());
    }

    #[test]
    fn test_from_value_drops_non_object_entry_items() {
        let cv = StructuredCv::from_value(json!({
            "languages": ["English", {"language": "French", "level": "Fluent"}]
        }));
        assert_eq!(cv.languages.len(), 1);
        assert_eq!(cv.languages[0].language, "French");
    }

    #[test]
    fn test_content_length_counts_all_fields() {
        let mut cv = StructuredCv::default();
        cv.contact_info.emails.push("jane@x.com".to_string()); // 10
        cv.skills.push("Rust".to_string()); // 4
        assert_eq!(cv.content_length(), 14);
    }

    #[test]
    fn test_missing_sections_shrinks_as_fields_fill() {
        let mut cv = StructuredCv::default();
        cv.skills.push("Rust".to_string());
        cv.contact_info.name = "Jane Doe".to_string();
        let missing = cv.missing_sections();
        assert!(!missing.contains(&"skills"));
        assert!(!missing.contains(&"contact_info"));
        assert_eq!(missing.len(), 5);
    }
}
