//! Cultural-semantics lexicon normalization
//!
//! The lexicon is a curated JSON file of idiomatic expressions whose clinical
//! meaning does not survive literal translation ("dil baithna" is a panic
//! symptom, not cardiology). Each entry is rendered into one canonical text
//! block so it can be embedded and retrieved exactly like a document chunk.
//!
//! The canonical text always carries all six labeled segments in fixed
//! order, with `N/A` placeholders for empty lists, so retrieval behavior
//! does not depend on which optional fields a curator filled in.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Source tag attached to every lexicon-derived record
pub const LEXICON_SOURCE_TAG: &str = "cultural_semantics";

fn default_language_pair() -> String {
    "hi-en".to_string()
}

/// One curated lexicon item, as authored in the lexicon JSON.
///
/// Lenient on input: missing scalars default to empty strings, missing lists
/// to empty lists. Only `id` is required.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconEntry {
    pub id: String,
    #[serde(default)]
    pub expression_native: String,
    #[serde(default)]
    pub expression_translit: String,
    #[serde(default)]
    pub literal_translation: String,
    #[serde(default)]
    pub clinical_meaning: String,
    #[serde(default)]
    pub cultural_context: String,
    #[serde(default)]
    pub synonyms_variants: Vec<String>,
    #[serde(default)]
    pub disambiguation_questions: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub severity_hint: String,
    #[serde(default)]
    pub risk_flag: bool,
    #[serde(default = "default_language_pair")]
    pub language_pair: String,
}

/// Top-level shape of the lexicon JSON file
#[derive(Debug, Deserialize)]
pub struct LexiconFile {
    #[serde(default)]
    pub entries: Vec<LexiconEntry>,
}

/// Metadata carried on every cultural record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CulturalMetadata {
    pub source: String,
    pub language_pair: String,
    pub category: String,
    pub severity_hint: String,
    pub risk_flag: bool,
}

/// Canonical record derived from one lexicon entry.
///
/// Field names and casing are a compatibility surface for downstream
/// consumers; keep them stable.
#[derive(Debug, Clone, Serialize)]
pub struct CulturalRecord {
    pub id: String,
    pub text: String,
    pub metadata: CulturalMetadata,
}

/// Parse the lexicon JSON into entries
pub fn parse_lexicon(json: &str) -> Result<Vec<LexiconEntry>> {
    let file: LexiconFile =
        serde_json::from_str(json).context("Failed to parse lexicon JSON")?;
    Ok(file.entries)
}

/// Render one entry into its canonical record.
///
/// Deterministic: same entry, same record, byte for byte.
pub fn normalize_entry(entry: &LexiconEntry) -> CulturalRecord {
    let synonyms = if entry.synonyms_variants.is_empty() {
        "N/A".to_string()
    } else {
        entry.synonyms_variants.join(", ")
    };
    let questions = if entry.disambiguation_questions.is_empty() {
        "N/A".to_string()
    } else {
        entry.disambiguation_questions.join(" | ")
    };

    let text = format!(
        "{} ({})\nLiteral: {}\nMeaning: {}\nCultural context: {}\nSynonyms/variants: {}\nDisambiguation questions: {}",
        entry.expression_native,
        entry.expression_translit,
        entry.literal_translation,
        entry.clinical_meaning,
        entry.cultural_context,
        synonyms,
        questions,
    )
    .trim()
    .to_string();

    CulturalRecord {
        id: entry.id.clone(),
        text,
        metadata: CulturalMetadata {
            source: LEXICON_SOURCE_TAG.to_string(),
            language_pair: entry.language_pair.clone(),
            category: entry.category.clone(),
            severity_hint: entry.severity_hint.clone(),
            risk_flag: entry.risk_flag,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> LexiconEntry {
        LexiconEntry {
            id: "dil_baithna".to_string(),
            expression_native: "दिल बैठना".to_string(),
            expression_translit: "dil baithna".to_string(),
            literal_translation: "the heart sits down".to_string(),
            clinical_meaning: "sudden anxiety or sinking feeling".to_string(),
            cultural_context: "commonly used for panic, not cardiac issues".to_string(),
            synonyms_variants: vec!["dil ghabrana".to_string(), "ji ghabrana".to_string()],
            disambiguation_questions: vec![
                "Do you also have chest pain?".to_string(),
                "Does it happen at rest?".to_string(),
            ],
            category: "emotional_distress".to_string(),
            severity_hint: "moderate".to_string(),
            risk_flag: false,
            language_pair: "hi-en".to_string(),
        }
    }

    #[test]
    fn test_canonical_text_layout() {
        let record = normalize_entry(&entry());
        assert_eq!(
            record.text,
            "दिल बैठना (dil baithna)\n\
             Literal: the heart sits down\n\
             Meaning: sudden anxiety or sinking feeling\n\
             Cultural context: commonly used for panic, not cardiac issues\n\
             Synonyms/variants: dil ghabrana, ji ghabrana\n\
             Disambiguation questions: Do you also have chest pain? | Does it happen at rest?"
        );
    }

    #[test]
    fn test_empty_lists_render_placeholders() {
        let mut e = entry();
        e.synonyms_variants.clear();
        e.disambiguation_questions.clear();
        let record = normalize_entry(&e);
        assert!(record.text.contains("Synonyms/variants: N/A"));
        assert!(record.text.contains("Disambiguation questions: N/A"));
    }

    #[test]
    fn test_empty_scalars_keep_all_segments() {
        let e = LexiconEntry {
            id: "bare".to_string(),
            expression_native: String::new(),
            expression_translit: String::new(),
            literal_translation: String::new(),
            clinical_meaning: String::new(),
            cultural_context: String::new(),
            synonyms_variants: vec![],
            disambiguation_questions: vec![],
            category: String::new(),
            severity_hint: String::new(),
            risk_flag: false,
            language_pair: default_language_pair(),
        };
        let record = normalize_entry(&e);
        assert!(record.text.contains("Literal:"));
        assert!(record.text.contains("Meaning:"));
        assert!(record.text.contains("Cultural context:"));
        assert!(record.text.contains("Synonyms/variants: N/A"));
        assert!(record.text.contains("Disambiguation questions: N/A"));
    }

    #[test]
    fn test_metadata_fields() {
        let record = normalize_entry(&entry());
        assert_eq!(
            record.metadata,
            CulturalMetadata {
                source: "cultural_semantics".to_string(),
                language_pair: "hi-en".to_string(),
                category: "emotional_distress".to_string(),
                severity_hint: "moderate".to_string(),
                risk_flag: false,
            }
        );
    }

    #[test]
    fn test_parse_lenient_defaults() {
        let json = r#"{"entries":[{"id":"minimal","risk_flag":true}]}"#;
        let entries = parse_lexicon(json).unwrap();
        assert_eq!(entries.len(), 1);
        let e = &entries[0];
        assert_eq!(e.id, "minimal");
        assert!(e.risk_flag);
        assert_eq!(e.language_pair, "hi-en");
        assert!(e.expression_native.is_empty());
        assert!(e.synonyms_variants.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_json() {
        assert!(parse_lexicon("not json").is_err());
    }

    #[test]
    fn test_determinism() {
        let a = normalize_entry(&entry());
        let b = normalize_entry(&entry());
        assert_eq!(a.text, b.text);
        assert_eq!(a.metadata, b.metadata);
    }
}
