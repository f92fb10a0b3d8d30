//! Artifact serialization
//!
//! Two equivalent exports per record family: line-delimited JSON (one record
//! per line, UTF-8, no ASCII escaping) for downstream embedding pipelines,
//! and CSV with the same field set for spreadsheet inspection. Field names
//! are a compatibility surface; keep them stable.

use anyhow::{Context, Result};
use serde::Serialize;
use setu_core::{Chunk, CulturalRecord};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const CHUNKS_JSONL: &str = "bilingual_chunks.jsonl";
pub const CHUNKS_CSV: &str = "bilingual_chunks.csv";
pub const CULTURAL_JSONL: &str = "cultural_semantics_entries.jsonl";
pub const CULTURAL_CSV: &str = "cultural_semantics_entries.csv";

/// Write records as line-delimited JSON
pub fn write_jsonl<T: Serialize>(records: &[T], path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        serde_json::to_writer(&mut writer, record)
            .with_context(|| format!("Failed to serialize record to {}", path.display()))?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Write chunk records as CSV
pub fn write_chunks_csv(chunks: &[Chunk], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    for chunk in chunks {
        writer.serialize(chunk)?;
    }
    writer.flush()?;
    Ok(())
}

/// Flat CSV row for a cultural record, metadata spread into columns
#[derive(Serialize)]
struct CulturalRow<'a> {
    id: &'a str,
    text: &'a str,
    source: &'a str,
    language_pair: &'a str,
    category: &'a str,
    severity_hint: &'a str,
    risk_flag: bool,
}

/// Write cultural records as CSV, one column per metadata field
pub fn write_cultural_csv(records: &[CulturalRecord], path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    for record in records {
        writer.serialize(CulturalRow {
            id: &record.id,
            text: &record.text,
            source: &record.metadata.source,
            language_pair: &record.metadata.language_pair,
            category: &record.metadata.category,
            severity_hint: &record.metadata.severity_hint,
            risk_flag: record.metadata.risk_flag,
        })?;
    }
    writer.flush()?;
    Ok(())
}
