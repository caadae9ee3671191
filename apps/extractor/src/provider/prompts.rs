//! Prompt constants for the structuring call.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise CV parser. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// The structuring instruction: raw document text plus an explicit
/// description of the output schema. `{raw_text}` is substituted at call
/// time.
pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"You are an expert CV parser. Extract and structure EVERY piece of information from the CV text below into JSON. Nothing may be omitted, summarized, or invented.

CRITICAL REQUIREMENTS:
- Preserve exact wording, dates, names, and all details
- If content does not fit a category cleanly, still place it in the closest section
- Extract the candidate's name and include it in contact_info
- Never fabricate data: leave a field empty when the CV does not contain it

STRUCTURE THE CONTENT INTO THESE SECTIONS:

1. contact_info: {"emails": [..], "phones": [..], "linkedin": "url", "address": "full address", "name": "Full Name"}
2. professional_summary: array of all summary/profile sentences
3. skills: array of ALL skills, technologies, and tools mentioned
4. languages: array of {"language": "Name", "level": "Proficiency"}
5. education: array of {"date_range": "as written", "degree": "..", "institution": "..", "details": [..]}
6. experience: array of {"date_range": "as written", "company": "..", "role": "..", "details": [..]}
7. projects: array of {"title": "..", "description": ".."}

Return ONLY the JSON object with exactly those seven keys.

CV text to parse:
{raw_text}"#;

/// Builds the full structuring prompt for one document.
pub fn structuring_prompt(raw_text: &str) -> String {
    STRUCTURE_PROMPT_TEMPLATE.replace("{raw_text}", raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_raw_text() {
        let prompt = structuring_prompt("Jane Doe\njane@x.com");
        assert!(prompt.contains("Jane Doe\njane@x.com"));
        assert!(!prompt.contains("{raw_text}"));
    }

    #[test]
    fn test_prompt_names_all_seven_schema_keys() {
        for key in crate::models::cv::SECTION_NAMES {
            assert!(
                STRUCTURE_PROMPT_TEMPLATE.contains(key),
                "schema key {key} missing from prompt"
            );
        }
    }
}
