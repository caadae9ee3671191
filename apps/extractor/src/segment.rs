//! Section segmentation — an explicit finite-state scan over document
//! lines. State is the current `SectionKind` cursor; transitions fire on
//! header recognition (canonical English/French vocabulary, or a generic
//! header-shape heuristic). Header lines are consumed; every other
//! non-blank, non-separator line lands in exactly one section.

use std::sync::LazyLock;

use regex::Regex;

/// The seven canonical résumé categories plus the two pseudo-states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Leading lines before any recognized heading.
    Preamble,
    Contact,
    Summary,
    Skills,
    Languages,
    Education,
    Experience,
    Projects,
    /// Opened by a header-shaped line outside the known vocabulary.
    Unclassified,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

static ZERO_WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[\u{200B}\u{200C}\u{200D}\u{FEFF}]").unwrap());
static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\s\-_=*]+$").unwrap());
static NAME_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z][a-zà-ÿ'\-]+(?:\s+[A-Z][a-zà-ÿ'\-]+){1,2}$").unwrap()
});

/// Canonical header vocabulary, many-to-one per category. Matching is
/// case-insensitive against the line with any trailing colon removed.
const HEADER_VOCABULARY: &[(&str, SectionKind)] = &[
    ("contact", SectionKind::Contact),
    ("contact information", SectionKind::Contact),
    ("contact info", SectionKind::Contact),
    ("coordonnées", SectionKind::Contact),
    ("informations personnelles", SectionKind::Contact),
    ("personal details", SectionKind::Contact),
    ("summary", SectionKind::Summary),
    ("professional summary", SectionKind::Summary),
    ("résumé", SectionKind::Summary),
    ("profile", SectionKind::Summary),
    ("profil", SectionKind::Summary),
    ("objective", SectionKind::Summary),
    ("objectif", SectionKind::Summary),
    ("about", SectionKind::Summary),
    ("about me", SectionKind::Summary),
    ("à propos", SectionKind::Summary),
    ("skills", SectionKind::Skills),
    ("technical skills", SectionKind::Skills),
    ("compétences", SectionKind::Skills),
    ("compétences techniques", SectionKind::Skills),
    ("competencies", SectionKind::Skills),
    ("core competencies", SectionKind::Skills),
    ("languages", SectionKind::Languages),
    ("langues", SectionKind::Languages),
    ("education", SectionKind::Education),
    ("éducation", SectionKind::Education),
    ("formation", SectionKind::Education),
    ("academic background", SectionKind::Education),
    ("diplômes", SectionKind::Education),
    ("experience", SectionKind::Experience),
    ("expérience", SectionKind::Experience),
    ("expérience professionnelle", SectionKind::Experience),
    ("professional experience", SectionKind::Experience),
    ("work experience", SectionKind::Experience),
    ("work history", SectionKind::Experience),
    ("employment", SectionKind::Experience),
    ("employment history", SectionKind::Experience),
    ("emploi", SectionKind::Experience),
    ("projects", SectionKind::Projects),
    ("projets", SectionKind::Projects),
    ("personal projects", SectionKind::Projects),
    ("projets personnels", SectionKind::Projects),
];

const MAX_HEADER_TOKENS: usize = 8;

/// Partitions raw text into ordered, non-overlapping sections. Every
/// surviving line belongs to exactly one section; a new section opens on
/// each header transition, so repeated headings yield repeated sections.
pub fn segment(text: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut cursor = SectionKind::Preamble;
    let mut current: Vec<String> = Vec::new();

    for raw_line in text.lines() {
        let line = ZERO_WIDTH_RE.replace_all(raw_line, "");
        let line = line.trim();
        if line.is_empty() || SEPARATOR_RE.is_match(line) {
            continue;
        }

        match recognize_header(line) {
            Some(next) => {
                if !current.is_empty() {
                    sections.push(Section {
                        kind: cursor,
                        lines: std::mem::take(&mut current),
                    });
                }
                cursor = next;
                // header line itself is discarded
            }
            None => current.push(line.to_string()),
        }
    }

    if !current.is_empty() {
        sections.push(Section {
            kind: cursor,
            lines: current,
        });
    }

    sections
}

/// All lines attributed to `kind`, concatenated across repeated sections
/// in document order.
pub fn lines_for(sections: &[Section], kind: SectionKind) -> Vec<&str> {
    sections
        .iter()
        .filter(|s| s.kind == kind)
        .flat_map(|s| s.lines.iter().map(String::as_str))
        .collect()
}

/// Header recognizer: vocabulary match wins; otherwise the generic shape
/// heuristic opens an unclassified bucket.
fn recognize_header(line: &str) -> Option<SectionKind> {
    let stripped = line.trim_end_matches(':').trim();
    if stripped.is_empty() {
        return None;
    }

    let lowered = stripped.to_lowercase();
    for (header, kind) in HEADER_VOCABULARY {
        if lowered == *header {
            return Some(*kind);
        }
    }

    if is_header_shape(stripped) {
        return Some(SectionKind::Unclassified);
    }
    None
}

/// Generic header shape: short, fully capitalized or title-cased, free of
/// contact fragments, and not shaped like a two/three-word personal name.
fn is_header_shape(line: &str) -> bool {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() > MAX_HEADER_TOKENS {
        return false;
    }
    if line.chars().any(|c| c.is_ascii_digit()) || line.contains('@') {
        return false;
    }
    // comma/semicolon lists are content, not headings
    if line.contains(',') || line.contains(';') {
        return false;
    }
    let lowered = line.to_lowercase();
    if lowered.contains("http") || lowered.contains("www.") {
        return false;
    }
    if !line.chars().any(|c| c.is_alphabetic()) {
        return false;
    }

    // A candidate's own name must not open a section.
    if NAME_SHAPE_RE.is_match(line) {
        return false;
    }

    let all_caps = line
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(|c| c.is_uppercase());
    let title_cased = tokens.iter().all(|t| {
        t.chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false)
    });

    all_caps || title_cased
}
