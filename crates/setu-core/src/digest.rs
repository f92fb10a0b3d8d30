//! Per-document clean bilingual records
//!
//! A digest is the whole-document view of a bilingual source: all usable
//! spans cleaned, classified by script, and concatenated per language. It
//! skips alignment entirely and is the input for corpus-level statistics and
//! monolingual baselines.

use serde::Serialize;

use crate::language::{classify_script, LanguageTag};
use crate::normalize::clean_text;
use crate::span::Span;

/// Spans shorter than this (after trim) are layout debris, not content
pub const MIN_SPAN_CHARS: usize = 3;

/// One clean per-document record
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDigest {
    pub id: String,
    pub source_file: String,
    pub primary_chars: usize,
    pub secondary_chars: usize,
    pub primary_text: String,
    pub secondary_text: String,
}

/// Build the digest for one document's spans.
///
/// Span order is preserved as given; callers that care about reading order
/// sort first. Classification here is script-only (no detector): spans with
/// neither script are dropped.
pub fn build_digest(spans: &[Span], id: &str, source_file: &str) -> DocumentDigest {
    let mut primary_blocks: Vec<String> = Vec::new();
    let mut secondary_blocks: Vec<String> = Vec::new();

    for span in spans {
        let trimmed = span.text.trim();
        if trimmed.chars().count() < MIN_SPAN_CHARS {
            continue;
        }
        let cleaned = clean_text(trimmed);
        if cleaned.is_empty() {
            continue;
        }
        match classify_script(&cleaned) {
            LanguageTag::Primary => primary_blocks.push(cleaned),
            LanguageTag::Secondary => secondary_blocks.push(cleaned),
            LanguageTag::Other => {}
        }
    }

    let primary_text = primary_blocks.join(" ");
    let secondary_text = secondary_blocks.join(" ");

    DocumentDigest {
        id: id.to_string(),
        source_file: source_file.to_string(),
        primary_chars: primary_text.chars().count(),
        secondary_chars: secondary_text.chars().count(),
        primary_text,
        secondary_text,
    }
}
