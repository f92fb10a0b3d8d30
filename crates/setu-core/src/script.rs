//! Unicode script detection for the supported language pair
//!
//! Script membership is the authoritative signal for classifying Hindi text:
//! any span containing a Devanagari code point is Hindi, no statistical
//! detector needed. Precision matters more than recall here — the detector
//! fallback covers the rest.

/// Check if text contains Devanagari characters
pub fn has_devanagari(text: &str) -> bool {
    text.chars().any(is_devanagari_char)
}

/// Check if a single character is Devanagari
#[inline]
pub fn is_devanagari_char(c: char) -> bool {
    let code = c as u32;
    (0x0900..=0x097F).contains(&code) || // Devanagari
    (0xA8E0..=0xA8FF).contains(&code) // Devanagari Extended
}

/// Check if text contains ASCII letters
pub fn has_latin(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_alphabetic())
}
