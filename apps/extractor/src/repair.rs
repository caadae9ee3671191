//! Response repair — recovers a best-effort JSON payload from a
//! provider's possibly malformed output. Pure: repairing an
//! already-valid payload is a no-op.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::errors::PipelineError;
use crate::models::cv::StructuredCv;

static TRAILING_COMMA_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",(\s*[}\]])").unwrap());

/// Parses a raw provider response as JSON, applying the deterministic
/// repair sequence on failure: strip code fences, truncate to the
/// outermost object/array, drop trailing commas before closers, append
/// the closer deficit. Fails with `MalformedResponse` when the payload
/// stays unparseable.
pub fn repair_json(raw: &str) -> Result<Value, PipelineError> {
    let text = strip_json_fences(raw);

    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Ok(value);
    }

    let repaired = apply_repairs(text);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => {
            debug!("JSON repair successful");
            Ok(value)
        }
        Err(e) => Err(PipelineError::MalformedResponse(e.to_string())),
    }
}

fn apply_repairs(text: &str) -> String {
    let mut repaired = text.trim().to_string();

    // truncate everything before the first opener and after the last closer
    if let Some(start) = repaired.find('{') {
        repaired = repaired[start..].to_string();
    } else if let Some(start) = repaired.find('[') {
        repaired = repaired[start..].to_string();
    }
    if let Some(end) = repaired.rfind('}') {
        repaired.truncate(end + 1);
    } else if let Some(end) = repaired.rfind(']') {
        repaired.truncate(end + 1);
    }

    repaired = TRAILING_COMMA_RE.replace_all(&repaired, "$1").to_string();

    let open_braces = repaired.matches('{').count();
    let close_braces = repaired.matches('}').count();
    let open_brackets = repaired.matches('[').count();
    let close_brackets = repaired.matches(']').count();
    if open_braces > close_braces {
        repaired.push_str(&"}".repeat(open_braces - close_braces));
    }
    if open_brackets > close_brackets {
        repaired.push_str(&"]".repeat(open_brackets - close_brackets));
    }

    repaired
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Last-ditch salvage when repair fails outright: regex-harvests the
/// fields that survive truncation most often (name, emails, skills,
/// summary) into a partial record. The validator still gates whatever
/// comes out of here.
pub fn salvage_partial(response: &str) -> Option<StructuredCv> {
    static NAME_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(?i)"name"\s*:\s*"([^"]+)""#).unwrap());
    static EMAILS_BLOCK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(?s)"emails"\s*:\s*\[(.*?)\]"#).unwrap());
    static EMAIL_ITEM_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#""([^"]+@[^"]+)""#).unwrap());
    static SKILLS_BLOCK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(?s)"skills"\s*:\s*\[(.*?)\]"#).unwrap());
    static SUMMARY_BLOCK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(?s)"professional_summary"\s*:\s*\[(.*?)\]"#).unwrap());
    static STRING_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)""#).unwrap());

    let mut cv = StructuredCv::default();
    let mut found = false;

    if let Some(caps) = NAME_RE.captures(response) {
        cv.contact_info.name = caps[1].to_string();
        found = true;
    }
    if let Some(caps) = EMAILS_BLOCK_RE.captures(response) {
        for item in EMAIL_ITEM_RE.captures_iter(&caps[1]) {
            cv.contact_info.emails.push(item[1].to_string());
            found = true;
        }
    }
    if let Some(caps) = SKILLS_BLOCK_RE.captures(response) {
        for item in STRING_ITEM_RE.captures_iter(&caps[1]) {
            cv.skills.push(item[1].to_string());
            found = true;
        }
    }
    if let Some(caps) = SUMMARY_BLOCK_RE.captures(response) {
        for item in STRING_ITEM_RE.captures_iter(&caps[1]) {
            cv.professional_summary.push(item[1].to_string());
            found = true;
        }
    }

    found.then_some(cv)
}
