//! Chunk building for aligned pair sequences
//!
//! Formats aligned pairs into marker blocks (`EN: ...` / `HI: ...`), joins
//! them in reading order, and splits the result into retrieval-sized chunks.
//! Each chunk is labeled with an alignment status so downstream consumers can
//! weight bilingual chunks differently from single-language ones.

use serde::Serialize;

use crate::aligner::AlignedPair;
use crate::language::LanguagePair;
use crate::splitter::TextSplitter;

/// Default chunk budget in characters
pub const DEFAULT_MAX_CHUNK_SIZE: usize = 800;

/// Default overlap between consecutive chunks in characters
pub const DEFAULT_OVERLAP: usize = 100;

/// Splitting configuration for chunk building
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    pub max_chunk_size: usize,
    pub overlap: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: DEFAULT_MAX_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// Whether a chunk carries both languages or only one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentStatus {
    Perfect,
    Partial,
}

/// A retrieval-ready unit of text.
///
/// Field names and casing are a compatibility surface for downstream
/// embedding/indexing consumers; keep them stable.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    pub chunk_id: String,
    pub source: String,
    pub language_pair: String,
    pub alignment_status: AlignmentStatus,
    pub length: usize,
    pub text: String,
}

/// Format one pair as a marker block. Pairs with both sides absent yield
/// `None`; the aligner never emits them, but skipping is cheap to keep.
fn format_block(pair: &AlignedPair, languages: &LanguagePair) -> Option<String> {
    let mut block = String::new();
    if let Some(primary) = &pair.primary_text {
        block.push_str(&languages.primary_marker());
        block.push(' ');
        block.push_str(primary);
    }
    if let Some(secondary) = &pair.secondary_text {
        if !block.is_empty() {
            block.push('\n');
        }
        block.push_str(&languages.secondary_marker());
        block.push(' ');
        block.push_str(secondary);
    }
    if block.is_empty() {
        None
    } else {
        Some(block)
    }
}

/// Build chunks from a document's aligned pairs.
///
/// Pair order is reading order and is preserved: blocks are joined with a
/// paragraph break and split with the paragraph break as the top separator
/// priority, so chunk boundaries fall between pairs whenever the budget
/// allows. A chunk is `Perfect` iff both language markers survive in its
/// text. Ids are `{source}_chunk_{n}`, 1-based, unique within the document
/// for one build run.
pub fn build_chunks(
    pairs: &[AlignedPair],
    source_name: &str,
    languages: &LanguagePair,
    config: &ChunkConfig,
) -> Vec<Chunk> {
    let blocks: Vec<String> = pairs
        .iter()
        .filter_map(|pair| format_block(pair, languages))
        .collect();

    if blocks.is_empty() {
        return Vec::new();
    }

    let splitter = TextSplitter::new(config.max_chunk_size, config.overlap);
    let pieces = splitter.split(&blocks.join("\n\n"));

    let primary_marker = languages.primary_marker();
    let secondary_marker = languages.secondary_marker();
    let label = languages.label();

    pieces
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let status = if text.contains(&primary_marker) && text.contains(&secondary_marker) {
                AlignmentStatus::Perfect
            } else {
                AlignmentStatus::Partial
            };
            Chunk {
                chunk_id: format!("{}_chunk_{}", source_name, i + 1),
                source: source_name.to_string(),
                language_pair: label.clone(),
                alignment_status: status,
                length: text.chars().count(),
                text,
            }
        })
        .collect()
}
