//! Geographic vs. business segment classification.
//!
//! A heuristic: segment names are matched against a fixed set of geographic patterns and
//! the set is geographic when more than half of its names match.

use filings_core::{Segment, SegmentType};
use regex::Regex;
use std::sync::LazyLock;

static GEOGRAPHIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // Continents and macro-regions
        r"(?i)\bamericas?\b",
        r"(?i)\b(europe|european|eurozone)\b",
        r"(?i)\b(asia|asian)\b",
        r"(?i)\b(africa|african)\b",
        r"(?i)\b(oceania|australasia|pacific|caribbean|middle\s+east|nordics?|scandinavia|greater\s+china)\b",
        // Region codes
        r"(?i)\b(emea|emeia|apac|apj|latam|anz)\b",
        r"\b(NA|EU)\b",
        r"(?i)\b(us|usa|uk)\b",
        r"(?i)\bu\.\s?s\.?",
        // Major countries
        r"(?i)\b(united\s+states|canada|mexico|brazil|argentina|chile|colombia|peru)\b",
        r"(?i)\b(united\s+kingdom|england|ireland|germany|france|italy|spain|netherlands|switzerland|sweden|norway|denmark|belgium|poland|russia)\b",
        r"(?i)\b(china|hong\s+kong|japan|korea|taiwan|india|singapore|indonesia|malaysia|thailand|vietnam|philippines|australia|new\s+zealand)\b",
        r"(?i)\b(israel|saudi\s+arabia|turkey|egypt|nigeria|south\s+africa)\b",
        // Qualifiers
        r"(?i)\b(international|domestic|foreign|overseas)\b",
        r"(?i)\brest\s+of\b",
        r"(?i)\bother\s+countries\b",
        r"(?i)\bnon-?u\.?s\b",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("geographic pattern is valid"))
    .collect()
});

/// Returns true if a segment name looks like a region or country.
#[must_use]
pub fn is_geographic(name: &str) -> bool {
    GEOGRAPHIC_PATTERNS.iter().any(|re| re.is_match(name))
}

/// Classify a set of cleaned segment names.
///
/// More than half geographic → [`SegmentType::Geographic`]; otherwise (including the empty
/// set) → [`SegmentType::Business`].
#[must_use]
pub fn classify_segment_type(segments: &[Segment]) -> SegmentType {
    let geographic = segments.iter().filter(|s| is_geographic(&s.name)).count();
    if geographic * 2 > segments.len() {
        SegmentType::Geographic
    } else {
        SegmentType::Business
    }
}
