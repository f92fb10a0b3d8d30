//! Text cleaning for extracted spans
//!
//! Lowercases, collapses whitespace, and strips the boilerplate that leaflet
//! publishers print on every page (URLs, footers, page numbers, copyright
//! lines). Applied by the digest pipeline before per-language concatenation.
//! Unicode normalization (NFC) is the extractor collaborator's job; text
//! arriving here is assumed composed.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

static NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"www\.[A-Za-z0-9./_-]+",
        r"reproductive health access project",
        r"healthinfotranslations\.org",
        r"page \d+ of \d+",
        r"©.*\d{4}",
    ]
    .iter()
    .map(|pat| Regex::new(&format!("(?i){pat}")).unwrap())
    .collect()
});

/// Clean one block of extracted text
pub fn clean_text(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    let lowered = text.to_lowercase();
    let collapsed = WHITESPACE.replace_all(&lowered, " ");
    let mut cleaned = collapsed.replace('–', "-").replace('•', "-");
    for pattern in NOISE.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    cleaned.trim().to_string()
}
