//! setu - bilingual document chunking CLI
//!
//! Batch pipeline from extractor span dumps to retrieval-ready records.
//!
//! Usage:
//!   setu build --input data/bilingual --lexicon data/cultural_semantics/data.json
//!   setu preprocess --input data/bilingual --out data/preprocessed/bilingual_clean.jsonl

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use setu_core::{
    normalize_entry, parse_lexicon, Chunk, ChunkConfig, CulturalRecord, LanguageClassifier,
    LanguagePair, DEFAULT_MAX_CHUNK_SIZE, DEFAULT_OVERLAP, DEFAULT_TOLERANCE,
};
use std::fs;
use std::path::{Path, PathBuf};

mod ingest;
mod output;
mod pipeline;

use pipeline::BuildOptions;

#[derive(Parser)]
#[command(name = "setu", version, about = "Bilingual document chunking pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build chunk records from span dumps, and cultural records from the lexicon
    Build {
        /// Directory of extractor span dumps (*.spans.jsonl)
        #[arg(short, long)]
        input: PathBuf,

        /// Cultural-semantics lexicon JSON file
        #[arg(long)]
        lexicon: Option<PathBuf>,

        /// Output directory for artifacts
        #[arg(short, long, default_value = "artifacts")]
        out: PathBuf,

        /// Vertical pairing tolerance in page coordinate units
        #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
        tolerance: f32,

        /// Chunk budget in characters
        #[arg(long, default_value_t = DEFAULT_MAX_CHUNK_SIZE)]
        max_chunk_size: usize,

        /// Overlap between consecutive chunks in characters
        #[arg(long, default_value_t = DEFAULT_OVERLAP)]
        overlap: usize,

        /// Process documents one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },

    /// Build one clean bilingual record per document
    Preprocess {
        /// Directory of extractor span dumps (*.spans.jsonl)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JSONL file
        #[arg(short, long, default_value = "data/preprocessed/bilingual_clean.jsonl")]
        out: PathBuf,

        /// Process documents one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
}

fn main() -> Result<()> {
    // Initialize tracing for warning output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            lexicon,
            out,
            tolerance,
            max_chunk_size,
            overlap,
            sequential,
        } => {
            let options = BuildOptions {
                tolerance,
                chunk: ChunkConfig {
                    max_chunk_size,
                    overlap,
                },
                sequential,
            };
            cmd_build(&input, lexicon.as_deref(), &out, &options)
        }
        Commands::Preprocess {
            input,
            out,
            sequential,
        } => cmd_preprocess(&input, &out, sequential),
    }
}

fn document_progress(total: usize) -> ProgressBar {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(ProgressStyle::with_template("{bar:30.green} {pos}/{len} {msg}").unwrap());
    bar.set_message("documents");
    bar
}

fn cmd_build(
    input: &Path,
    lexicon: Option<&Path>,
    out: &Path,
    options: &BuildOptions,
) -> Result<()> {
    let files = ingest::find_span_files(input)?;
    if files.is_empty() {
        println!(
            "{}",
            format!("No span dumps found in {}", input.display()).yellow()
        );
    } else {
        println!("Processing {} document(s) from {}", files.len(), input.display());
    }

    let classifier = LanguageClassifier::with_default_detector(LanguagePair::default());
    let bar = document_progress(files.len());
    let batch = pipeline::run_build(&files, &classifier, options, Some(&bar));
    bar.finish_and_clear();

    let mut all_chunks: Vec<Chunk> = Vec::new();
    for report in &batch.reports {
        println!(
            "  {}: {} spans, {} pairs, {} chunks",
            report.source.bold(),
            report.span_count,
            report.pair_count,
            report.chunks.len()
        );
    }
    for report in batch.reports {
        all_chunks.extend(report.chunks);
    }

    fs::create_dir_all(out)
        .with_context(|| format!("Failed to create output directory: {}", out.display()))?;

    if all_chunks.is_empty() {
        println!("{}", "No chunks produced".yellow());
    } else {
        let chunks_jsonl = out.join(output::CHUNKS_JSONL);
        let chunks_csv = out.join(output::CHUNKS_CSV);
        output::write_jsonl(&all_chunks, &chunks_jsonl)?;
        output::write_chunks_csv(&all_chunks, &chunks_csv)?;
        println!(
            "{} {} chunk(s) -> {} and {}",
            "Saved".green(),
            all_chunks.len(),
            chunks_jsonl.display(),
            chunks_csv.display()
        );
    }

    if let Some(lexicon_path) = lexicon {
        let records = load_cultural_records(lexicon_path)?;
        let cultural_jsonl = out.join(output::CULTURAL_JSONL);
        let cultural_csv = out.join(output::CULTURAL_CSV);
        output::write_jsonl(&records, &cultural_jsonl)?;
        output::write_cultural_csv(&records, &cultural_csv)?;
        println!(
            "{} {} cultural record(s) -> {} and {}",
            "Saved".green(),
            records.len(),
            cultural_jsonl.display(),
            cultural_csv.display()
        );
    }

    print_skips(&batch.skipped);
    Ok(())
}

fn load_cultural_records(path: &Path) -> Result<Vec<CulturalRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lexicon file: {}", path.display()))?;
    let entries = parse_lexicon(&json)
        .with_context(|| format!("Failed to parse lexicon file: {}", path.display()))?;
    Ok(entries.iter().map(normalize_entry).collect())
}

fn cmd_preprocess(input: &Path, out: &Path, sequential: bool) -> Result<()> {
    let files = ingest::find_span_files(input)?;
    if files.is_empty() {
        println!(
            "{}",
            format!("No span dumps found in {}", input.display()).yellow()
        );
    } else {
        println!("Processing {} document(s) from {}", files.len(), input.display());
    }

    let bar = document_progress(files.len());
    let batch = pipeline::run_digests(&files, sequential, Some(&bar));
    bar.finish_and_clear();

    for digest in &batch.reports {
        println!(
            "  {}: {} primary chars, {} secondary chars",
            digest.id.bold(),
            digest.primary_chars,
            digest.secondary_chars
        );
    }

    if batch.reports.is_empty() {
        println!("{}", "No records produced".yellow());
    } else {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        output::write_jsonl(&batch.reports, out)?;
        println!(
            "{} {} record(s) -> {}",
            "Saved".green(),
            batch.reports.len(),
            out.display()
        );
    }

    print_skips(&batch.skipped);
    Ok(())
}

fn print_skips(skipped: &[pipeline::SkippedDocument]) {
    if skipped.is_empty() {
        return;
    }
    println!(
        "{}",
        format!("Skipped {} document(s):", skipped.len()).yellow()
    );
    for skip in skipped {
        println!("  {}: {}", skip.source, skip.reason);
    }
}
