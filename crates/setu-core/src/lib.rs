//! setu-core: alignment and chunking engine for bilingual documents
//!
//! This crate provides:
//! - Script-first language classification with a statistical detector seam
//! - Greedy spatial alignment of primary/secondary span pairs
//! - Size-bounded chunk building with alignment-status labels
//! - Cultural-semantics lexicon normalization into the same record shape
//!
//! All transforms are synchronous and pure over in-memory sequences; the
//! batch driver in the `setu` crate owns file I/O, parallelism, and output
//! serialization.

pub mod aligner;
pub mod chunker;
pub mod digest;
pub mod language;
pub mod lexicon;
pub mod normalize;
pub mod script;
pub mod span;
pub mod splitter;

// Re-exports
pub use aligner::{align_spans, AlignedPair, DEFAULT_TOLERANCE};
pub use chunker::{
    build_chunks, AlignmentStatus, Chunk, ChunkConfig, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP,
};
pub use digest::{build_digest, DocumentDigest, MIN_SPAN_CHARS};
pub use language::{
    classify_script, LanguageClassifier, LanguageDetector, LanguagePair, LanguageTag,
    StopwordDetector,
};
pub use lexicon::{
    normalize_entry, parse_lexicon, CulturalMetadata, CulturalRecord, LexiconEntry, LexiconFile,
    LEXICON_SOURCE_TAG,
};
pub use normalize::clean_text;
pub use script::{has_devanagari, has_latin, is_devanagari_char};
pub use span::{sort_reading_order, Span};
pub use splitter::TextSplitter;
