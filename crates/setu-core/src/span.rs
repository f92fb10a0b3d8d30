//! Positioned text spans from the layout extractor
//!
//! The extractor collaborator emits one span per positioned text fragment,
//! with no ordering guarantee. Reading order is imposed here: page, then
//! top-to-bottom, then left-to-right. That sort is the single source of
//! ordering the aligner relies on.

use serde::Deserialize;

/// One positioned text fragment from a document page.
///
/// `font` is advisory metadata carried through from the extractor; it plays
/// no part in alignment.
#[derive(Debug, Clone, Deserialize)]
pub struct Span {
    pub text: String,
    pub page: u32,
    pub x0: f32,
    pub y0: f32,
    #[serde(default)]
    pub font: String,
}

impl Span {
    /// Spans whose text is empty after trimming carry no content and are
    /// discarded before classification.
    pub fn is_usable(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

/// Sort spans into reading order: `(page, y0, x0)` ascending.
///
/// Float keys use `total_cmp`, so NaN coordinates sort last within their page
/// instead of panicking. Such spans never satisfy the aligner's tolerance
/// check and always come out as orphans.
pub fn sort_reading_order(spans: &mut [Span]) {
    spans.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then_with(|| a.y0.total_cmp(&b.y0))
            .then_with(|| a.x0.total_cmp(&b.x0))
    });
}
