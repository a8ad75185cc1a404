//! Formatting trigger engine.
//!
//! Watches characters before they reach the document. A marker (`#`, `*`,
//! `**`, `***`) is buffered outside the document; a following space
//! resolves it into a style toggle at the caret. Anything else abandons the
//! marker and hands the buffered characters back for literal insertion.

use tracing::{debug, warn};

use crate::document::{Document, InlineStyle};
use crate::error::{Error, Result};

/// Whether `ch` can start or extend a marker.
pub const fn is_marker_char(ch: char) -> bool {
    matches!(ch, '#' | '*')
}

/// Marker token accumulated so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PendingMarker {
    #[default]
    None,
    Hash,
    Star,
    DoubleStar,
    TripleStar,
}

impl PendingMarker {
    pub const fn token(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Hash => "#",
            Self::Star => "*",
            Self::DoubleStar => "**",
            Self::TripleStar => "***",
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::None)
    }

    /// Number of marker characters buffered.
    pub const fn len(self) -> usize {
        self.token().len()
    }

    /// Style this token toggles when resolved.
    pub const fn style(self) -> Option<InlineStyle> {
        match self {
            Self::None => None,
            Self::Hash => Some(InlineStyle::HeaderOne),
            Self::Star => Some(InlineStyle::Bold),
            Self::DoubleStar => Some(InlineStyle::DoubleEmphasis),
            Self::TripleStar => Some(InlineStyle::Underline),
        }
    }

    /// Extend the token with `ch`, or `None` when `ch` abandons it.
    pub const fn push(self, ch: char) -> Option<Self> {
        match (self, ch) {
            (Self::None, '#') => Some(Self::Hash),
            (Self::None, '*') => Some(Self::Star),
            (Self::Star, '*') => Some(Self::DoubleStar),
            (Self::DoubleStar, '*') => Some(Self::TripleStar),
            _ => None,
        }
    }

    /// Drop the last buffered marker character.
    #[must_use]
    pub const fn pop(self) -> Self {
        match self {
            Self::None | Self::Hash | Self::Star => Self::None,
            Self::DoubleStar => Self::Star,
            Self::TripleStar => Self::DoubleStar,
        }
    }
}

/// What the engine did with one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharOutcome {
    /// Buffered as part of a marker; nothing inserted.
    Consumed,
    /// A marker resolved into a toggle of this style; the space was absorbed.
    Resolved(InlineStyle),
    /// Not consumed: insert this literal text (buffered marker plus the char).
    Insert(String),
}

/// Result of feeding one character to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharStep {
    pub document: Document,
    pub pending: PendingMarker,
    pub outcome: CharOutcome,
}

/// Feed one character that is about to be inserted.
pub fn on_char(document: Document, pending: PendingMarker, ch: char) -> CharStep {
    if ch == ' ' && !pending.is_empty() {
        if !document.selection().is_collapsed() {
            debug!(marker = pending.token(), "ranged selection, abandoning marker");
            return abandon(document, pending, ch);
        }
        return match marker_style(pending) {
            Ok(style) => CharStep {
                document: resolve(document, pending, style),
                pending: PendingMarker::None,
                outcome: CharOutcome::Resolved(style),
            },
            Err(err) => {
                warn!(%err, "abandoning marker");
                abandon(document, pending, ch)
            }
        };
    }

    match pending.push(ch) {
        Some(next) => CharStep {
            document,
            pending: next,
            outcome: CharOutcome::Consumed,
        },
        None => abandon(document, pending, ch),
    }
}

fn marker_style(pending: PendingMarker) -> Result<InlineStyle> {
    pending
        .style()
        .ok_or_else(|| Error::UnresolvableMarker(pending.token().to_string()))
}

/// Strip any literal echo of the marker before the caret, then toggle.
fn resolve(document: Document, pending: PendingMarker, style: InlineStyle) -> Document {
    let caret = document.selection();
    let marker_len = pending.len();
    let echoed = caret.start >= marker_len
        && document.get_block(caret.block).is_some_and(|block| {
            block
                .text()
                .chars()
                .skip(caret.start - marker_len)
                .take(marker_len)
                .eq(pending.token().chars())
        });
    let document = if echoed {
        document.remove_text(caret.block, caret.start - marker_len, marker_len)
    } else {
        document
    };
    debug!(marker = pending.token(), %style, echoed, "resolved formatting marker");
    document.toggle_inline_style(style)
}

fn abandon(document: Document, pending: PendingMarker, ch: char) -> CharStep {
    if !pending.is_empty() {
        debug!(marker = pending.token(), next = %ch, "marker abandoned");
    }
    CharStep {
        document,
        pending: PendingMarker::None,
        outcome: CharOutcome::Insert(format!("{}{ch}", pending.token())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, BlockId, Selection, StyleRange};

    fn feed(document: Document, chars: &str) -> CharStep {
        let mut step = CharStep {
            document,
            pending: PendingMarker::None,
            outcome: CharOutcome::Consumed,
        };
        for ch in chars.chars() {
            step = on_char(step.document, step.pending, ch);
        }
        step
    }

    #[test]
    fn test_marker_chars_are_buffered() {
        let step = feed(Document::empty(), "#");
        assert_eq!(step.pending, PendingMarker::Hash);
        assert_eq!(step.outcome, CharOutcome::Consumed);
        assert_eq!(step.document.blocks()[0].text(), "");
    }

    #[test]
    fn test_hash_space_toggles_heading_without_residue() {
        let step = feed(Document::empty(), "# ");
        assert_eq!(step.outcome, CharOutcome::Resolved(InlineStyle::HeaderOne));
        assert_eq!(step.pending, PendingMarker::None);
        assert_eq!(step.document.blocks()[0].text(), "");
        assert!(
            step.document
                .current_inline_styles()
                .contains(InlineStyle::HeaderOne)
        );
    }

    #[test]
    fn test_star_sequences_map_to_styles() {
        let cases = [
            ("* ", InlineStyle::Bold),
            ("** ", InlineStyle::DoubleEmphasis),
            ("*** ", InlineStyle::Underline),
        ];
        for (input, expected) in cases {
            let step = feed(Document::empty(), input);
            assert_eq!(step.outcome, CharOutcome::Resolved(expected), "input {input:?}");
            let styles = step.document.current_inline_styles();
            assert_eq!(styles.len(), 1);
            assert!(styles.contains(expected));
        }
    }

    #[test]
    fn test_hash_then_letter_is_abandoned_literally() {
        let step = feed(Document::empty(), "#x");
        assert_eq!(step.outcome, CharOutcome::Insert("#x".to_string()));
        assert_eq!(step.pending, PendingMarker::None);
        assert!(step.document.current_inline_styles().is_empty());
    }

    #[test]
    fn test_hash_then_star_is_abandoned() {
        let step = feed(Document::empty(), "#*");
        assert_eq!(step.outcome, CharOutcome::Insert("#*".to_string()));
    }

    #[test]
    fn test_fourth_star_abandons() {
        let step = feed(Document::empty(), "****");
        assert_eq!(step.outcome, CharOutcome::Insert("****".to_string()));
        assert_eq!(step.pending, PendingMarker::None);
    }

    #[test]
    fn test_plain_chars_pass_through() {
        let step = on_char(Document::empty(), PendingMarker::None, 'a');
        assert_eq!(step.outcome, CharOutcome::Insert("a".to_string()));
        let step = on_char(Document::empty(), PendingMarker::None, ' ');
        assert_eq!(step.outcome, CharOutcome::Insert(" ".to_string()));
    }

    #[test]
    fn test_resolution_only_toggles_mapped_style() {
        let doc = Document::empty().toggle_inline_style(InlineStyle::Underline);
        let step = feed(doc, "* ");
        let styles = step.document.current_inline_styles();
        assert!(styles.contains(InlineStyle::Underline));
        assert!(styles.contains(InlineStyle::Bold));
    }

    #[test]
    fn test_second_resolution_toggles_style_off() {
        let step = feed(Document::empty(), "* ");
        let step = on_char(step.document, step.pending, '*');
        let step = on_char(step.document, step.pending, ' ');
        assert!(step.document.current_inline_styles().is_empty());
    }

    #[test]
    fn test_ranged_selection_abandons_on_space() {
        let doc = Document::from_blocks(vec![Block::new(BlockId::new(0), "hello")]);
        let id = doc.blocks()[0].id();
        let doc = doc.set_selection(Selection {
            block: id,
            start: 0,
            end: 2,
        });
        let step = feed(doc, "# ");
        assert_eq!(step.outcome, CharOutcome::Insert("# ".to_string()));
        assert!(step.document.blocks()[0].style_ranges().is_empty());
    }

    #[test]
    fn test_echoed_marker_is_removed_on_resolve() {
        let block = Block::new(BlockId::new(0), "ab**cd").toggle_style(4..6, InlineStyle::Bold);
        let doc = Document::from_blocks(vec![block]);
        let id = doc.blocks()[0].id();
        let doc = doc.set_selection(Selection::caret(id, 4));
        let step = on_char(doc, PendingMarker::DoubleStar, ' ');
        let block = &step.document.blocks()[0];
        assert_eq!(block.text(), "abcd");
        assert_eq!(block.style_ranges(), &[StyleRange::new(InlineStyle::Bold, 2, 2)]);
        assert_eq!(step.document.selection().start, 2);
    }

    #[test]
    fn test_unrelated_text_before_caret_is_kept() {
        let doc = Document::from_blocks(vec![Block::new(BlockId::new(0), "ab")]);
        let id = doc.blocks()[0].id();
        let doc = doc.set_selection(Selection::caret(id, 2));
        let step = feed(doc, "# ");
        assert_eq!(step.document.blocks()[0].text(), "ab");
    }

    #[test]
    fn test_pending_marker_pop() {
        assert_eq!(PendingMarker::TripleStar.pop(), PendingMarker::DoubleStar);
        assert_eq!(PendingMarker::Star.pop(), PendingMarker::None);
        assert_eq!(PendingMarker::Hash.pop(), PendingMarker::None);
        assert_eq!(PendingMarker::None.pop(), PendingMarker::None);
    }

    #[test]
    fn test_empty_marker_is_unresolvable() {
        let err = marker_style(PendingMarker::None).unwrap_err();
        assert!(matches!(err, Error::UnresolvableMarker(_)));
    }
}
