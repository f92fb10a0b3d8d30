//! Cross-lingual block alignment
//!
//! Pairs primary-language spans with the secondary-language span that renders
//! the same content, using vertical proximity on the page as the pairing
//! signal. The extractor gives us coordinates, not structure, so pairing is
//! a heuristic: a secondary span matches the most recent unmatched primary
//! span on the same page within a vertical tolerance.
//!
//! The scan is greedy, forward-only, and never revisits a decision. A
//! secondary span that arrives slightly out of vertical order relative to its
//! true primary counterpart (common in multi-column layouts) can therefore be
//! mis-paired or orphaned. Known limitation: downstream consumers depend on
//! this behavior, so it is preserved rather than repaired.

use crate::language::{LanguageClassifier, LanguageTag};
use crate::span::Span;

/// Default vertical tolerance in page coordinate units
pub const DEFAULT_TOLERANCE: f32 = 120.0;

/// One alignment unit: a primary block, a secondary block, or both.
///
/// At least one side is always present. Both present means the blocks were
/// paired; exactly one means an orphan (an alignment gap, not an error).
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub primary_text: Option<String>,
    pub secondary_text: Option<String>,
    pub primary_page: Option<u32>,
    pub secondary_page: Option<u32>,
}

impl AlignedPair {
    fn paired(primary: &Span, secondary: &Span) -> Self {
        Self {
            primary_text: Some(primary.text.clone()),
            secondary_text: Some(secondary.text.clone()),
            primary_page: Some(primary.page),
            secondary_page: Some(secondary.page),
        }
    }

    fn orphan_primary(span: &Span) -> Self {
        Self {
            primary_text: Some(span.text.clone()),
            secondary_text: None,
            primary_page: Some(span.page),
            secondary_page: None,
        }
    }

    fn orphan_secondary(span: &Span) -> Self {
        Self {
            primary_text: None,
            secondary_text: Some(span.text.clone()),
            primary_page: None,
            secondary_page: Some(span.page),
        }
    }

    /// Both sides present
    pub fn is_paired(&self) -> bool {
        self.primary_text.is_some() && self.secondary_text.is_some()
    }

    /// Exactly one side present
    pub fn is_orphan(&self) -> bool {
        !self.is_paired()
    }
}

/// Accumulator for the alignment fold: emitted pairs plus the single
/// unmatched primary span still waiting for its counterpart.
struct AlignState<'a> {
    pairs: Vec<AlignedPair>,
    pending: Option<&'a Span>,
}

/// Align classified spans into an ordered sequence of [`AlignedPair`].
///
/// `spans` must already be in reading order (see
/// [`crate::span::sort_reading_order`]); the caller owns that sort. The scan
/// is a single forward pass, O(n) in span count:
///
/// - a primary span flushes any still-pending primary as an orphan, then
///   becomes the new pending span;
/// - a secondary span pairs with the pending primary if both are on the same
///   page and within `tolerance` vertically (inclusive at exactly
///   `tolerance`), otherwise it is emitted as an orphan with the pending slot
///   left untouched;
/// - spans classified `Other` are dropped without touching the pending slot;
/// - a pending primary left over at the end is flushed as a final orphan.
///
/// Spans with non-finite coordinates are never rejected; a NaN `y0` fails
/// every tolerance comparison, so such spans always come out unpaired.
pub fn align_spans(
    spans: &[Span],
    classifier: &LanguageClassifier,
    tolerance: f32,
) -> Vec<AlignedPair> {
    let state = spans.iter().fold(
        AlignState {
            pairs: Vec::new(),
            pending: None,
        },
        |mut state, span| {
            match classifier.classify(&span.text) {
                LanguageTag::Primary => {
                    if let Some(prev) = state.pending.take() {
                        state.pairs.push(AlignedPair::orphan_primary(prev));
                    }
                    state.pending = Some(span);
                }
                LanguageTag::Secondary => match state.pending {
                    Some(prev)
                        if prev.page == span.page
                            && (span.y0 - prev.y0).abs() <= tolerance =>
                    {
                        state.pairs.push(AlignedPair::paired(prev, span));
                        state.pending = None;
                    }
                    _ => state.pairs.push(AlignedPair::orphan_secondary(span)),
                },
                LanguageTag::Other => {}
            }
            state
        },
    );

    let mut pairs = state.pairs;
    if let Some(prev) = state.pending {
        pairs.push(AlignedPair::orphan_primary(prev));
    }

    tracing::debug!(
        "Aligned {} spans into {} pairs ({} paired, {} orphans)",
        spans.len(),
        pairs.len(),
        pairs.iter().filter(|p| p.is_paired()).count(),
        pairs.iter().filter(|p| p.is_orphan()).count()
    );
    pairs
}
