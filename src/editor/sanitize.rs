//! Post-change cleanup of stray marker characters.
//!
//! Removes every marker character that sits before ordinary text in a
//! block, and trims a trailing run of marker characters unless the trigger
//! engine is still buffering a marker for that block. Removal goes through
//! [`Document::remove_text`], so style ranges shift and shrink exactly as
//! they do when a marker resolves.

use tracing::debug;

use crate::document::{BlockId, Document};

use super::trigger::{PendingMarker, is_marker_char};

/// Strip marker characters from every block.
///
/// Idempotent: a sanitized document comes back unchanged.
pub fn sanitize(document: Document, pending: PendingMarker) -> Document {
    let caret_block = document.selection().block;
    let ids: Vec<BlockId> = document.blocks().iter().map(|block| block.id()).collect();
    ids.into_iter().fold(document, |doc, id| {
        let keep_trailing = !pending.is_empty() && id == caret_block;
        sanitize_block(doc, id, keep_trailing)
    })
}

/// Whether any block still holds a marker character.
pub fn has_markers(document: &Document) -> bool {
    document
        .blocks()
        .iter()
        .any(|block| block.text().chars().any(is_marker_char))
}

fn sanitize_block(mut doc: Document, id: BlockId, keep_trailing: bool) -> Document {
    let Some(block) = doc.get_block(id) else {
        return doc;
    };
    let chars: Vec<char> = block.text().chars().collect();
    let trailing = chars
        .iter()
        .rev()
        .take_while(|ch| is_marker_char(**ch))
        .count();
    let interior_end = chars.len() - trailing;
    let interior: Vec<usize> = chars[..interior_end]
        .iter()
        .enumerate()
        .filter(|(_, ch)| is_marker_char(**ch))
        .map(|(idx, _)| idx)
        .collect();

    // Back to front so earlier indices stay valid.
    for idx in interior.iter().rev() {
        doc = doc.remove_text(id, *idx, 1);
    }
    let mut removed = interior.len();
    if trailing > 0 && !keep_trailing {
        doc = doc.remove_text(id, interior_end - interior.len(), trailing);
        removed += trailing;
    }
    if removed > 0 {
        debug!(block = %id, removed, kept_trailing = keep_trailing && trailing > 0, "sanitized marker characters");
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, InlineStyle, Selection, StyleRange};

    fn single(block: Block) -> Document {
        Document::from_blocks(vec![block])
    }

    fn block(text: &str) -> Block {
        Block::new(BlockId::new(0), text)
    }

    #[test]
    fn test_removes_interior_marker_and_shifts_ranges() {
        let doc = single(block("ab#cd").toggle_style(3..5, InlineStyle::Bold));
        let doc = sanitize(doc, PendingMarker::None);
        let b = &doc.blocks()[0];
        assert_eq!(b.text(), "abcd");
        assert_eq!(b.style_ranges(), &[StyleRange::new(InlineStyle::Bold, 2, 2)]);
    }

    #[test]
    fn test_removes_consecutive_markers() {
        let doc = single(block("a***b#c").toggle_style(4..7, InlineStyle::Underline));
        let doc = sanitize(doc, PendingMarker::None);
        let b = &doc.blocks()[0];
        assert_eq!(b.text(), "abc");
        assert_eq!(
            b.style_ranges(),
            &[StyleRange::new(InlineStyle::Underline, 1, 2)]
        );
    }

    #[test]
    fn test_trims_trailing_marker() {
        let doc = sanitize(single(block("hello**")), PendingMarker::None);
        assert_eq!(doc.blocks()[0].text(), "hello");
    }

    #[test]
    fn test_keeps_trailing_marker_while_resolving_in_caret_block() {
        let doc = single(block("#he#"));
        let id = doc.blocks()[0].id();
        let doc = doc.set_selection(Selection::caret(id, 4));
        let doc = sanitize(doc, PendingMarker::Hash);
        assert_eq!(doc.blocks()[0].text(), "he#");
    }

    #[test]
    fn test_pending_marker_does_not_protect_other_blocks() {
        let doc = Document::from_blocks(vec![block("one*"), block("two#")]);
        let doc = sanitize(doc, PendingMarker::Star);
        assert_eq!(doc.blocks()[0].text(), "one*");
        assert_eq!(doc.blocks()[1].text(), "two");
    }

    #[test]
    fn test_sanitize_keeps_ranges_and_ids() {
        let doc = Document::from_blocks(vec![
            block("plain").toggle_style(0..5, InlineStyle::HeaderOne),
            block("#x"),
        ]);
        let ids: Vec<_> = doc.blocks().iter().map(Block::id).collect();
        let doc = sanitize(doc, PendingMarker::None);
        assert_eq!(
            doc.blocks()[0].style_ranges(),
            &[StyleRange::new(InlineStyle::HeaderOne, 0, 5)]
        );
        assert_eq!(doc.blocks()[1].text(), "x");
        let after: Vec<_> = doc.blocks().iter().map(Block::id).collect();
        assert_eq!(ids, after);
    }

    #[test]
    fn test_caret_shifts_left_over_removed_markers() {
        let doc = single(block("a#b*c"));
        let id = doc.blocks()[0].id();
        let doc = doc.set_selection(Selection::caret(id, 5));
        let doc = sanitize(doc, PendingMarker::None);
        assert_eq!(doc.selection(), Selection::caret(id, 3));
    }

    #[test]
    fn test_marker_only_block_becomes_empty() {
        let doc = sanitize(single(block("#*#")), PendingMarker::None);
        assert_eq!(doc.blocks()[0].text(), "");
        assert!(!has_markers(&doc));
    }

    #[test]
    fn test_sanitize_twice_is_stable() {
        let doc = single(block("#a*b**").toggle_style(1..4, InlineStyle::Bold));
        let once = sanitize(doc, PendingMarker::None);
        let twice = sanitize(once.clone(), PendingMarker::None);
        assert_eq!(once, twice);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn marked_block() -> impl Strategy<Value = Block> {
            ("[ab#* ]{0,24}", 0..24usize, 0..24usize, 0..4usize).prop_map(
                |(text, start, len, style_idx)| {
                    let style = InlineStyle::ALL[style_idx];
                    block(&text).toggle_style(start..start + len, style)
                },
            )
        }

        proptest! {
            #[test]
            fn sanitize_is_idempotent(blocks in prop::collection::vec(marked_block(), 1..5)) {
                let doc = Document::from_blocks(blocks);
                let once = sanitize(doc, PendingMarker::None);
                let twice = sanitize(once.clone(), PendingMarker::None);
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn sanitize_leaves_no_markers_and_valid_ranges(
                blocks in prop::collection::vec(marked_block(), 1..5),
            ) {
                let doc = sanitize(Document::from_blocks(blocks), PendingMarker::None);
                prop_assert!(!has_markers(&doc));
                for b in doc.blocks() {
                    for range in b.style_ranges() {
                        prop_assert!(range.length > 0);
                        prop_assert!(range.end() <= b.len());
                    }
                    for pair in b.style_ranges().windows(2) {
                        if pair[0].style == pair[1].style {
                            prop_assert!(pair[0].end() <= pair[1].offset);
                        }
                    }
                }
            }
        }
    }
}
