//! Document loading — turns a source file into one normalized text blob.
//!
//! Pure transform: line breaks preserved, intra-line whitespace collapsed,
//! document-model artifacts (null bytes, empty paragraphs) stripped. Page
//! and paragraph boundaries become double line breaks so the segmenter
//! keeps the layout signal.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use regex::Regex;
use tracing::debug;

use crate::errors::PipelineError;

static INTRA_WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Loads raw text from a CV file, dispatching on the extension.
/// Fails fast with `UnsupportedFormat` / `SourceNotFound`; both are fatal
/// to the document.
pub fn load_document(path: &Path) -> Result<String, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::SourceNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let text = match ext.as_str() {
        "pdf" => extract_pdf(path)?,
        "docx" | "doc" => extract_docx(path)?,
        "txt" => extract_txt(path)?,
        other => return Err(PipelineError::UnsupportedFormat(format!(".{other}"))),
    };

    debug!("Loaded {} ({} chars)", path.display(), text.len());
    Ok(text)
}

fn extract_pdf(path: &Path) -> Result<String, PipelineError> {
    let text = pdf_extract::extract_text(path)
        .map_err(|e| PipelineError::Read(std::io::Error::other(e.to_string())))?;
    Ok(clean_text(&text))
}

/// Walks the docx-rs tree (Document → Paragraph → Run → Text), collecting
/// one string per paragraph and joining paragraphs with double breaks.
fn extract_docx(path: &Path) -> Result<String, PipelineError> {
    let bytes = fs::read(path)?;
    let docx = read_docx(&bytes)
        .map_err(|e| PipelineError::Read(std::io::Error::other(format!("{e:?}"))))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            let mut parts: Vec<String> = Vec::new();
            for pc in &para.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        if let RunChild::Text(t) = rc {
                            parts.push(t.text.clone());
                        }
                    }
                }
            }
            let para_text = parts.concat();
            if !para_text.trim().is_empty() {
                paragraphs.push(para_text);
            }
        }
    }

    Ok(clean_text(&paragraphs.join("\n\n")))
}

fn extract_txt(path: &Path) -> Result<String, PipelineError> {
    let raw = fs::read_to_string(path)?;
    Ok(clean_text(&raw))
}

/// Collapses runs of spaces/tabs, squeezes blank-line runs down to one
/// blank line, and drops null bytes. Idempotent.
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let cleaned = text.replace('\u{0000}', "");
    let cleaned = INTRA_WS_RE.replace_all(&cleaned, " ");
    let cleaned = BLANK_RUN_RE.replace_all(&cleaned, "\n\n");
    cleaned.trim().to_string()
}
