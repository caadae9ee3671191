//! Address extraction — generates candidates from three independent
//! techniques, merges near-duplicates, and ranks the survivors with a
//! weighted heuristic score. Stateless and deterministic: identical input
//! always yields the identical best candidate and score.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Address-context keywords (English/French). A hit means the line likely
/// announces an address.
static KEYWORD_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\baddress\b",
        r"\bhome\b",
        r"\blocation\b",
        r"\bresidence\b",
        r"\bresidential\b",
        r"\blives?\s+(?:at|in)\b",
        r"\bresiding\s+(?:at|in)\b",
        r"\bdomiciled\s+(?:at|in)\b",
        r"\badresse\b",
        r"\bdomicile\b",
        r"\brésidence\b",
        r"\blieu\s+de\s+résidence\b",
        r"\bdemeurant\s+(?:à|au|aux)\b",
        r"\bhabite\s+(?:à|au|aux)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Content-after-keyword extraction patterns, tried in order.
static AFTER_KEYWORD_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)(?:address|adresse|location|domicile|résidence)\s*:?\s*(.+)",
        r"(?i)(?:lieu\s+de\s+résidence|home\s+address|residential\s+address)\s*:?\s*(.+)",
        r"(?i)(?:lives?\s+(?:at|in)|residing\s+(?:at|in)|domiciled\s+(?:at|in))\s+(.+)",
        r"(?i)(?:demeurant\s+(?:à|au|aux)|habite\s+(?:à|au|aux))\s+(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Postal-code shapes: US, Canada, France, UK, Netherlands, Germany.
static POSTAL_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d{5}(?:-\d{4})?\b",
        r"(?i)\b[a-z]\d[a-z]\s?\d[a-z]\d\b",
        r"(?i)\b[a-z]{1,2}\d{1,2}[a-z]?\s?\d[a-z]{2}\b",
        r"(?i)\b\d{4}\s?[a-z]{2}\b",
        r"\b\d{5}\s+\w+\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Street, building, and district tokens (matched on lowercased text).
static STRUCTURE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\d+\s*[,.]?\s*\w+",
        r"\b(?:street|st\.?|road|rd\.?|avenue|ave\.?|boulevard|blvd\.?|lane|ln\.?|drive|dr\.?|court|ct\.?|place|pl\.?|way|circle|square|park|plaza)\b",
        r"\b(?:rue|avenue|boulevard|place|impasse|allée|chemin|route|quai|cours|passage|villa|square|esplanade|promenade)\b",
        r"\b(?:apartment|apt\.?|suite|unit|floor|building|house|residence|complex)\b",
        r"\b(?:appartement|appt\.?|étage|bâtiment|maison|résidence|immeuble|villa)\b",
        r"\b(?:district|neighborhood|area|zone|sector|quarter|region)\b",
        r"\b(?:quartier|secteur|zone|région|arrondissement)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static GEO_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b\w+\s*,\s*\w+",
        r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s*,",
        r"\b\w+\s+\d{4,5}\b",
        r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s*\d{4,5}\b",
        r"(?i)\b(?:france|canada|usa|united\s+states|uk|united\s+kingdom|germany|spain|italy|morocco|maroc)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static STATE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b[A-Z]{2}\s+\d{5}\b",
        r"\b(?:ON|BC|AB|QC|NS|NB|MB|SK|PE|NL|NT|YT|NU)\s+[A-Za-z]\d[A-Za-z]\s?\d[A-Za-z]\d\b",
        r"\b\d{5}\s+[A-Z][a-z]+\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Content an address line would not carry (matched on lowercased text);
/// each hit costs a flat penalty.
static NON_ADDRESS_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\b(?:email|telephone|phone|mobile|cell|fax|tel|gsm|contact)\b",
        r"\b(?:experience|education|formation|compétences|skills|work|employment|job)\b",
        r"\b(?:born|né|date|age|single|married|célibataire|marié|divorced)\b",
        r"\b(?:objective|summary|profile|profil|résumé|curriculum)\b",
        r"@",
        r"(?:\+|00)\d{10,}",
        r"\b(?:https?://|www\.)",
        r"\b(?:mr\.?|mrs\.?|ms\.?|dr\.?|prof\.?|mme\.?|mlle\.?)\s+\w+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static DIGIT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static CAPITAL_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+").unwrap());

const NON_ADDRESS_PENALTY: i32 = 3;
const DUPLICATE_OVERLAP_RATIO: f64 = 0.7;
const MIN_CANDIDATE_LEN: usize = 10;

/// Returns the best-scoring address candidate above `min_score` (relaxed
/// to >0 when nothing qualifies), or an empty string.
pub fn extract_address(text: &str, min_score: i32) -> String {
    let candidates = merge_near_duplicates(collect_candidates(text));
    if candidates.is_empty() {
        return String::new();
    }

    let scored: Vec<(String, i32)> = candidates
        .into_iter()
        .map(|c| {
            let score = score_candidate(&c);
            (c, score)
        })
        .collect();

    let qualified: Vec<&(String, i32)> = {
        let strict: Vec<_> = scored.iter().filter(|(_, s)| *s > min_score).collect();
        if strict.is_empty() {
            scored.iter().filter(|(_, s)| *s > 0).collect()
        } else {
            strict
        }
    };

    // strictly-greater comparison keeps the earliest candidate on ties
    let mut best: Option<&(String, i32)> = None;
    for entry in qualified {
        if best.map(|(_, s)| entry.1 > *s).unwrap_or(true) {
            best = Some(entry);
        }
    }
    best.map(|(c, _)| c.trim().to_string()).unwrap_or_default()
}

/// Candidate generation: keyword lines, structurally address-like lines,
/// and two-line street + postal/geographic combinations.
fn collect_candidates(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    let mut candidates = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if line.len() < MIN_CANDIDATE_LEN {
            continue;
        }
        let lowered = line.to_lowercase();

        if KEYWORD_RES.iter().any(|re| re.is_match(&lowered)) {
            let mut extracted = false;
            for pattern in AFTER_KEYWORD_RES.iter() {
                if let Some(caps) = pattern.captures(line) {
                    let content = caps[1].trim();
                    if !content.is_empty() {
                        candidates.push(content.to_string());
                        extracted = true;
                    }
                    break;
                }
            }
            if !extracted {
                candidates.push(line.to_string());
            }
        } else if has_structure_words(&lowered)
            || has_postal_code(line)
            || has_geographic_indicators(line)
            || has_state_province(line)
        {
            candidates.push(line.to_string());
        }

        // two-line combination: street-like line followed by a line
        // carrying the postal code or geographic marker
        if i + 1 < lines.len()
            && (has_structure_words(&lowered) || DIGIT_RUN_RE.is_match(line))
            && !has_postal_code(line)
        {
            let next = lines[i + 1];
            if !next.is_empty()
                && (has_postal_code(next)
                    || has_geographic_indicators(next)
                    || has_state_province(next))
            {
                candidates.push(format!("{line}, {next}"));
            }
        }
    }

    candidates
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| c.len() >= MIN_CANDIDATE_LEN)
        .collect()
}

/// Merges near-duplicates (token-set overlap ratio above 0.7), keeping
/// the longer string.
fn merge_near_duplicates(candidates: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();

    for candidate in candidates {
        let candidate_tokens = token_set(&candidate);
        let mut duplicate_of: Option<usize> = None;

        for (i, existing) in unique.iter().enumerate() {
            let existing_tokens = token_set(existing);
            let overlap = candidate_tokens.intersection(&existing_tokens).count();
            let denom = candidate_tokens.len().max(existing_tokens.len()).max(1);
            if overlap as f64 / denom as f64 > DUPLICATE_OVERLAP_RATIO {
                duplicate_of = Some(i);
                break;
            }
        }

        match duplicate_of {
            Some(i) => {
                if candidate.len() > unique[i].len() {
                    unique[i] = candidate;
                }
            }
            None => unique.push(candidate),
        }
    }

    unique
}

fn token_set(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// The weighted score table. Floored at zero.
pub fn score_candidate(candidate: &str) -> i32 {
    let trimmed = candidate.trim();
    let lowered = trimmed.to_lowercase();
    let mut score = 0i32;

    // length band: moderate lengths look like addresses
    let len = trimmed.len();
    if (20..=200).contains(&len) {
        score += 3;
    } else if (10..=300).contains(&len) {
        score += 1;
    } else if len > 300 {
        score -= 2;
    }

    let postal = has_postal_code(trimmed);
    let structure = has_structure_words(&lowered);
    let geo = has_geographic_indicators(trimmed);

    if postal {
        score += 5;
    }
    if structure {
        score += 4;
    }
    if geo {
        score += 3;
    }
    if has_state_province(trimmed) {
        score += 2;
    }

    let digit_runs = DIGIT_RUN_RE.find_iter(trimmed).count() as i32;
    if digit_runs >= 1 {
        score += digit_runs.min(3);
    }

    let commas = trimmed.matches(',').count() as i32;
    if (1..=3).contains(&commas) {
        score += commas;
    } else if commas > 3 {
        score -= 1;
    }

    let capital_words = CAPITAL_WORD_RE.find_iter(trimmed).count() as i32;
    if capital_words >= 2 {
        score += (capital_words / 2).min(3);
    }

    let penalties = NON_ADDRESS_RES
        .iter()
        .filter(|re| re.is_match(&lowered))
        .count() as i32;
    score -= penalties * NON_ADDRESS_PENALTY;

    // complete-looking addresses carry all three signals at once
    if postal && structure && geo {
        score += 3;
    }

    score.max(0)
}

fn has_postal_code(text: &str) -> bool {
    POSTAL_RES.iter().any(|re| re.is_match(text))
}

fn has_structure_words(lowered: &str) -> bool {
    STRUCTURE_RES.iter().any(|re| re.is_match(lowered))
}

fn has_geographic_indicators(text: &str) -> bool {
    GEO_RES.iter().any(|re| re.is_match(text))
}

fn has_state_province(text: &str) -> bool {
    STATE_RES.iter().any(|re| re.is_match(text))
}
