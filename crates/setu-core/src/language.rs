//! Language classification for bilingual spans
//!
//! Classification is script-first: any Devanagari code point marks a span as
//! the secondary language, with no further checks. Spans with no secondary
//! script fall through to a statistical detector, and anything the detector
//! cannot place lands on the primary language. Orphan-friendly: the aligner
//! downstream treats misclassification as an alignment gap, not an error.

use crate::script;

/// Language role of a span relative to the configured pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageTag {
    Primary,
    Secondary,
    Other,
}

/// The configured language pair for a corpus.
///
/// Codes are lowercase ISO 639-1 prefixes ("en", "hi"). Tags produced by
/// classification are relative to this pair, not absolute.
#[derive(Debug, Clone)]
pub struct LanguagePair {
    pub primary: String,
    pub secondary: String,
}

impl Default for LanguagePair {
    fn default() -> Self {
        Self {
            primary: "en".to_string(),
            secondary: "hi".to_string(),
        }
    }
}

impl LanguagePair {
    /// Tag identifying the combination in output records, e.g. `hi-en`
    pub fn label(&self) -> String {
        format!("{}-{}", self.secondary, self.primary)
    }

    /// Marker prefixing primary-language text in formatted blocks, e.g. `EN:`
    pub fn primary_marker(&self) -> String {
        format!("{}:", self.primary.to_uppercase())
    }

    /// Marker prefixing secondary-language text in formatted blocks, e.g. `HI:`
    pub fn secondary_marker(&self) -> String {
        format!("{}:", self.secondary.to_uppercase())
    }
}

/// Statistical language detector collaborator.
///
/// Implementations report a lowercase language code ("en", "hi", "mr", ...),
/// or `None` when the input is too short or ambiguous to call. Determinism
/// across identical inputs is the implementation's responsibility.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Option<String>;
}

/// Deterministic stopword-frequency detector.
///
/// Scores text against small embedded stopword sets for English and romanized
/// Hindi and reports whichever wins. Ties and zero-hit inputs are reported as
/// `None`. This is the default wiring so batch runs are reproducible without
/// an external detector service.
pub struct StopwordDetector;

const EN_STOPWORDS: &[&str] = &[
    "the", "and", "of", "to", "in", "is", "it", "for", "with", "you", "your",
    "are", "this", "that", "have", "not", "can", "will", "from", "may", "or",
    "be", "on", "if", "use",
];

const HI_ROMAN_STOPWORDS: &[&str] = &[
    "hai", "hain", "ke", "ki", "ka", "se", "aur", "mein", "nahi", "kya",
    "yeh", "woh", "par", "liye", "hota", "hoti", "karna", "kare", "apne",
    "koi", "bhi", "kuch", "ko", "tha",
];

impl LanguageDetector for StopwordDetector {
    fn detect(&self, text: &str) -> Option<String> {
        let mut en_hits = 0usize;
        let mut hi_hits = 0usize;

        for word in text
            .split(|c: char| !c.is_alphabetic())
            .filter(|w| !w.is_empty())
        {
            let lower = word.to_lowercase();
            if EN_STOPWORDS.contains(&lower.as_str()) {
                en_hits += 1;
            }
            if HI_ROMAN_STOPWORDS.contains(&lower.as_str()) {
                hi_hits += 1;
            }
        }

        match en_hits.cmp(&hi_hits) {
            std::cmp::Ordering::Greater => Some("en".to_string()),
            std::cmp::Ordering::Less => Some("hi".to_string()),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Script-first classifier with statistical fallback.
///
/// The detector is only consulted for spans with no secondary-script
/// characters; its failure mode (ambiguous or very short input) resolves to
/// `Primary`, never to an error.
pub struct LanguageClassifier {
    pair: LanguagePair,
    detector: Box<dyn LanguageDetector>,
}

impl LanguageClassifier {
    pub fn new(pair: LanguagePair, detector: Box<dyn LanguageDetector>) -> Self {
        Self { pair, detector }
    }

    /// Classifier wired to the embedded [`StopwordDetector`]
    pub fn with_default_detector(pair: LanguagePair) -> Self {
        Self::new(pair, Box::new(StopwordDetector))
    }

    pub fn pair(&self) -> &LanguagePair {
        &self.pair
    }

    /// Classify one span of text relative to the configured pair.
    ///
    /// Script detection is authoritative for the secondary language. The
    /// detector code is matched by prefix so regional variants ("hi-IN")
    /// still count. Unknown codes and detector failures default to primary.
    pub fn classify(&self, text: &str) -> LanguageTag {
        if script::has_devanagari(text) {
            return LanguageTag::Secondary;
        }
        match self.detector.detect(text) {
            Some(code) if code.starts_with(&self.pair.secondary) => LanguageTag::Secondary,
            _ => LanguageTag::Primary,
        }
    }
}

/// Script-only classification, used where no detector is wired in.
///
/// Unlike [`LanguageClassifier::classify`], spans carrying neither script
/// (digits, punctuation, dingbats) are reported as `Other` and dropped by
/// callers instead of defaulting to primary.
pub fn classify_script(text: &str) -> LanguageTag {
    if script::has_devanagari(text) {
        LanguageTag::Secondary
    } else if script::has_latin(text) {
        LanguageTag::Primary
    } else {
        LanguageTag::Other
    }
}
