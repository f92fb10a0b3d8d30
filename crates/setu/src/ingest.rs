//! Span dump ingestion
//!
//! The layout extractor runs upstream and dumps one `*.spans.jsonl` file per
//! source document: one JSON span record per line, in no particular order.
//! This module finds those dumps and parses them; reading order is imposed
//! later by the pipeline.

use anyhow::{bail, Context, Result};
use setu_core::Span;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// File suffix the extractor uses for span dumps
pub const SPAN_FILE_SUFFIX: &str = ".spans.jsonl";

/// List span dumps in a directory, sorted by file name for deterministic
/// batch order. Errors only when the directory itself is missing; an empty
/// directory is the caller's zero-output condition, not a failure.
pub fn find_span_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Input directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let is_dump = path
            .file_name()
            .map(|n| n.to_string_lossy().ends_with(SPAN_FILE_SUFFIX))
            .unwrap_or(false);
        if path.is_file() && is_dump {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Document identifier from a span dump path: the file name minus the suffix
pub fn source_name(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.strip_suffix(SPAN_FILE_SUFFIX)
        .map(str::to_string)
        .unwrap_or(name)
}

/// Topic identifier for digest records: the source name without the
/// publisher's `_Hindi` suffix, lowercased
pub fn document_id(source: &str) -> String {
    source
        .strip_suffix("_Hindi")
        .unwrap_or(source)
        .to_lowercase()
}

/// Load spans from one dump.
///
/// Blank lines are skipped; a malformed record fails the whole document
/// (the pipeline isolates the failure to that document). Spans whose text is
/// empty after trimming are discarded here, before they reach the core.
pub fn load_spans(path: &Path) -> Result<Vec<Span>> {
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open span dump: {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut spans = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line =
            line.with_context(|| format!("Failed to read line from {}", path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let span: Span = serde_json::from_str(&line).with_context(|| {
            format!("Malformed span record at {}:{}", path.display(), lineno + 1)
        })?;
        if span.is_usable() {
            spans.push(span);
        }
    }
    Ok(spans)
}
