//! Per-document batch pipeline
//!
//! Documents share no state, so the batch fans out one rayon task per
//! document and merges results sequentially afterward. Intra-document
//! ordering (reading order of spans, pairs, chunks) is preserved inside each
//! task; the merged reports are re-sorted by source name so batch output is
//! deterministic regardless of worker scheduling. A failure in one document
//! is recorded and skipped, never fatal to the batch.

use anyhow::Result;
use indicatif::ProgressBar;
use rayon::prelude::*;
use setu_core::{
    align_spans, build_chunks, build_digest, sort_reading_order, Chunk, ChunkConfig,
    DocumentDigest, LanguageClassifier,
};
use std::path::{Path, PathBuf};

use crate::ingest;

/// Knobs for the chunk-building batch
pub struct BuildOptions {
    pub tolerance: f32,
    pub chunk: ChunkConfig,
    pub sequential: bool,
}

/// Per-document result of the chunk-building pipeline
pub struct DocumentReport {
    pub source: String,
    pub span_count: usize,
    pub pair_count: usize,
    pub chunks: Vec<Chunk>,
}

/// A document the batch gave up on
pub struct SkippedDocument {
    pub source: String,
    pub reason: String,
}

/// Merged outcome of a batch run
pub struct BatchResult<T> {
    pub reports: Vec<T>,
    pub skipped: Vec<SkippedDocument>,
}

/// Run one document through sort → align → chunk
fn process_document(
    path: &Path,
    classifier: &LanguageClassifier,
    options: &BuildOptions,
) -> Result<DocumentReport> {
    let source = ingest::source_name(path);
    let mut spans = ingest::load_spans(path)?;
    sort_reading_order(&mut spans);

    let pairs = align_spans(&spans, classifier, options.tolerance);
    let chunks = build_chunks(&pairs, &source, classifier.pair(), &options.chunk);
    if chunks.is_empty() {
        tracing::warn!("No chunks produced for {source}");
    }

    Ok(DocumentReport {
        source,
        span_count: spans.len(),
        pair_count: pairs.len(),
        chunks,
    })
}

/// Run the chunk-building batch over all span dumps
pub fn run_build(
    files: &[PathBuf],
    classifier: &LanguageClassifier,
    options: &BuildOptions,
    progress: Option<&ProgressBar>,
) -> BatchResult<DocumentReport> {
    let run_one = |path: &PathBuf| {
        let outcome = process_document(path, classifier, options);
        if let Some(bar) = progress {
            bar.inc(1);
        }
        (ingest::source_name(path), outcome)
    };

    let outcomes: Vec<(String, Result<DocumentReport>)> = if options.sequential {
        files.iter().map(run_one).collect()
    } else {
        files.par_iter().map(run_one).collect()
    };

    merge(outcomes, |report| report.source.clone())
}

/// Run the digest batch over all span dumps
pub fn run_digests(
    files: &[PathBuf],
    sequential: bool,
    progress: Option<&ProgressBar>,
) -> BatchResult<DocumentDigest> {
    let run_one = |path: &PathBuf| {
        let source = ingest::source_name(path);
        let outcome = ingest::load_spans(path).map(|mut spans| {
            sort_reading_order(&mut spans);
            let dump_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            build_digest(&spans, &ingest::document_id(&source), &dump_name)
        });
        if let Some(bar) = progress {
            bar.inc(1);
        }
        (source, outcome)
    };

    let outcomes: Vec<(String, Result<DocumentDigest>)> = if sequential {
        files.iter().map(run_one).collect()
    } else {
        files.par_iter().map(run_one).collect()
    };

    merge(outcomes, |digest| digest.id.clone())
}

/// Partition outcomes into reports and skipped documents, warning per skip,
/// and sort reports by key for deterministic output order
fn merge<T>(
    outcomes: Vec<(String, Result<T>)>,
    key: impl Fn(&T) -> String,
) -> BatchResult<T> {
    let mut reports = Vec::new();
    let mut skipped = Vec::new();

    for (source, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(err) => {
                let reason = format!("{err:#}");
                tracing::warn!("Skipping document {source}: {reason}");
                skipped.push(SkippedDocument { source, reason });
            }
        }
    }

    reports.sort_by_key(|r| key(r));
    BatchResult { reports, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use setu_core::LanguagePair;
    use std::fs;

    fn write_dump(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, lines.join("\n")).unwrap();
        path
    }

    fn options() -> BuildOptions {
        BuildOptions {
            tolerance: setu_core::DEFAULT_TOLERANCE,
            chunk: ChunkConfig::default(),
            sequential: true,
        }
    }

    fn classifier() -> LanguageClassifier {
        LanguageClassifier::with_default_detector(LanguagePair::default())
    }

    #[test]
    fn test_build_batch_produces_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_dump(
            dir.path(),
            "leaflet.spans.jsonl",
            &[
                r#"{"text":"intro","page":1,"x0":0.0,"y0":10.0,"font":"f"}"#,
                r#"{"text":"परिचय","page":1,"x0":0.0,"y0":20.0,"font":"f"}"#,
            ],
        )];

        let batch = run_build(&files, &classifier(), &options(), None);
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.reports.len(), 1);
        let report = &batch.reports[0];
        assert_eq!(report.source, "leaflet");
        assert_eq!(report.span_count, 2);
        assert_eq!(report.pair_count, 1);
        assert_eq!(report.chunks.len(), 1);
        assert_eq!(report.chunks[0].chunk_id, "leaflet_chunk_1");
    }

    #[test]
    fn test_bad_document_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_dump(dir.path(), "bad.spans.jsonl", &["this is not json"]),
            write_dump(
                dir.path(),
                "good.spans.jsonl",
                &[r#"{"text":"intro","page":1,"x0":0.0,"y0":10.0,"font":"f"}"#],
            ),
        ];

        let batch = run_build(&files, &classifier(), &options(), None);
        assert_eq!(batch.reports.len(), 1);
        assert_eq!(batch.reports[0].source, "good");
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].source, "bad");
    }

    #[test]
    fn test_empty_document_is_reported_not_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_dump(dir.path(), "empty.spans.jsonl", &[""])];

        let batch = run_build(&files, &classifier(), &options(), None);
        assert_eq!(batch.reports.len(), 1);
        assert_eq!(batch.reports[0].span_count, 0);
        assert!(batch.reports[0].chunks.is_empty());
        assert!(batch.skipped.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempfile::tempdir().unwrap();
        let mut files = Vec::new();
        for i in 0..6 {
            files.push(write_dump(
                dir.path(),
                &format!("doc{i}.spans.jsonl"),
                &[
                    r#"{"text":"heading text","page":1,"x0":0.0,"y0":10.0,"font":"f"}"#,
                    r#"{"text":"शीर्षक","page":1,"x0":0.0,"y0":22.0,"font":"f"}"#,
                ],
            ));
        }

        let sequential = run_build(&files, &classifier(), &options(), None);
        let parallel = run_build(
            &files,
            &classifier(),
            &BuildOptions {
                sequential: false,
                ..options()
            },
            None,
        );

        let seq_ids: Vec<&str> = sequential
            .reports
            .iter()
            .flat_map(|r| r.chunks.iter().map(|c| c.chunk_id.as_str()))
            .collect();
        let par_ids: Vec<&str> = parallel
            .reports
            .iter()
            .flat_map(|r| r.chunks.iter().map(|c| c.chunk_id.as_str()))
            .collect();
        assert_eq!(seq_ids, par_ids);
    }

    #[test]
    fn test_digest_batch() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_dump(
            dir.path(),
            "Birth_Control_Hindi.spans.jsonl",
            &[
                r#"{"text":"Birth Control","page":1,"x0":0.0,"y0":10.0,"font":"f"}"#,
                r#"{"text":"गर्भ निरोधक","page":1,"x0":0.0,"y0":20.0,"font":"f"}"#,
            ],
        )];

        let batch = run_digests(&files, true, None);
        assert!(batch.skipped.is_empty());
        assert_eq!(batch.reports.len(), 1);
        let digest = &batch.reports[0];
        assert_eq!(digest.id, "birth_control");
        assert_eq!(digest.source_file, "Birth_Control_Hindi.spans.jsonl");
        assert_eq!(digest.primary_text, "birth control");
        assert_eq!(digest.secondary_text, "गर्भ निरोधक");
    }
}
