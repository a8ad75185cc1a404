//! The document: ordered blocks plus a selection.

use super::block::{Block, BlockId};
use super::style::{InlineStyle, StyleSet};

/// A selection within a single block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub block: BlockId,
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// A collapsed selection (caret) at `offset`.
    pub const fn caret(block: BlockId, offset: usize) -> Self {
        Self {
            block,
            start: offset,
            end: offset,
        }
    }

    pub const fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Caret movements available to the generic editing path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
}

/// An ordered, non-empty sequence of blocks and the current selection.
///
/// Every editing operation consumes the document and returns the edited
/// snapshot, so callers can keep earlier snapshots for change detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    blocks: Vec<Block>,
    selection: Selection,
    next_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A document holding one empty block with the caret in it.
    pub fn empty() -> Self {
        let id = BlockId::new(0);
        Self {
            blocks: vec![Block::new(id, "")],
            selection: Selection::caret(id, 0),
            next_id: 1,
        }
    }

    /// Build a document from blocks, caret at the start of the first block.
    ///
    /// Block ids are reassigned in order so they are unique.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            return Self::empty();
        }
        let blocks: Vec<Block> = blocks
            .into_iter()
            .zip(0..)
            .map(|(block, raw)| block.with_id(BlockId::new(raw)))
            .collect();
        let selection = Selection::caret(blocks[0].id(), 0);
        let next_id = blocks.len() as u64;
        Self {
            blocks,
            selection,
            next_id,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub const fn selection(&self) -> Selection {
        self.selection
    }

    pub fn get_block(&self, id: BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| block.id() == id)
    }

    pub fn block_index(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| block.id() == id)
    }

    /// The block holding the selection.
    pub fn selected_block(&self) -> &Block {
        let idx = self.block_index(self.selection.block).unwrap_or(0);
        &self.blocks[idx]
    }

    /// Whole document text, blocks joined by newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Total number of characters across all blocks.
    pub fn char_count(&self) -> usize {
        self.blocks.iter().map(Block::len).sum()
    }

    /// Same block texts and ranges in the same order, ignoring ids.
    pub fn same_content(&self, other: &Self) -> bool {
        self.blocks.len() == other.blocks.len()
            && self
                .blocks
                .iter()
                .zip(&other.blocks)
                .all(|(a, b)| a.same_content(b))
    }

    /// Swap one block, leaving order and every other block unchanged.
    #[must_use]
    pub fn replace_block(mut self, id: BlockId, block: Block) -> Self {
        if let Some(idx) = self.block_index(id) {
            self.blocks[idx] = block;
        }
        self
    }

    /// Move the selection, clamped to valid offsets.
    ///
    /// A selection naming an unknown block is ignored. Any explicit caret
    /// style override is dropped.
    #[must_use]
    pub fn set_selection(mut self, selection: Selection) -> Self {
        let Some(block) = self.get_block(selection.block) else {
            return self;
        };
        let len = block.len();
        let start = selection.start.min(selection.end).min(len);
        let end = selection.start.max(selection.end).min(len);
        self.selection = Selection {
            block: selection.block,
            start,
            end,
        };
        self.clear_style_overrides();
        self
    }

    /// Split block `id` at `at`; the tail gets a fresh id and the caret.
    #[must_use]
    pub fn split_block(mut self, id: BlockId, at: usize) -> Self {
        let Some(idx) = self.block_index(id) else {
            return self;
        };
        let tail_id = self.mint_id();
        let block = self.blocks.remove(idx);
        let (head, tail) = block.split_off(at, tail_id);
        self.blocks.insert(idx, head);
        self.blocks.insert(idx + 1, tail);
        self.selection = Selection::caret(tail_id, 0);
        self
    }

    /// Styles active at the start of the selection.
    ///
    /// A collapsed caret uses the block's explicit override when present,
    /// otherwise the character before the caret (or the first character
    /// when the caret sits at offset 0).
    pub fn current_inline_styles(&self) -> StyleSet {
        let block = self.selected_block();
        let Selection { start, .. } = self.selection;
        if !self.selection.is_collapsed() {
            return block.styles_at(start);
        }
        if let Some(styles) = block.current_styles() {
            return styles;
        }
        if start > 0 {
            block.styles_at(start - 1)
        } else {
            block.styles_at(0)
        }
    }

    /// Toggle `style` for the selection.
    ///
    /// On a caret this flips the style for the next typed character; on a
    /// range it flips every selected character.
    #[must_use]
    pub fn toggle_inline_style(self, style: InlineStyle) -> Self {
        let selection = self.selection;
        if selection.is_collapsed() {
            let styles = self.current_inline_styles().toggled(style);
            return self.map_block(selection.block, |block| {
                block.with_current_styles(Some(styles))
            });
        }
        self.map_block(selection.block, |block| {
            block.toggle_style(selection.start..selection.end, style)
        })
    }

    /// Remove text from a block, keeping the selection on the same characters.
    #[must_use]
    pub fn remove_text(mut self, id: BlockId, start: usize, len: usize) -> Self {
        let Some(idx) = self.block_index(id) else {
            return self;
        };
        let block_len = self.blocks[idx].len();
        let start = start.min(block_len);
        let end = start.saturating_add(len).min(block_len);
        let block = self.blocks.remove(idx);
        self.blocks.insert(idx, block.remove_text(start, end - start));
        if self.selection.block == id {
            let shift = |pos: usize| {
                if pos <= start {
                    pos
                } else if pos >= end {
                    pos - (end - start)
                } else {
                    start
                }
            };
            self.selection.start = shift(self.selection.start);
            self.selection.end = shift(self.selection.end);
        }
        self
    }

    /// Insert literal text at the selection, replacing a ranged selection.
    ///
    /// New characters carry the current inline styles. Newlines split the
    /// block.
    #[must_use]
    pub fn insert_text(self, text: &str) -> Self {
        let mut doc = self.delete_selection();
        for (idx, line) in text.split('\n').enumerate() {
            if idx > 0 {
                let caret = doc.selection;
                doc = doc.split_block(caret.block, caret.start);
            }
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let styles = doc.current_inline_styles();
            let caret = doc.selection;
            doc = doc.map_block(caret.block, |block| {
                block
                    .insert_text(caret.start, line, styles)
                    .with_current_styles(None)
            });
            doc.selection = Selection::caret(caret.block, caret.start + line.chars().count());
        }
        doc
    }

    /// Backspace: delete the selection, the character before the caret, or
    /// merge the block into the previous one.
    ///
    /// Returns the document and whether anything changed.
    pub fn delete_backward(self) -> (Self, bool) {
        let selection = self.selection;
        if !selection.is_collapsed() {
            return (self.delete_selection(), true);
        }
        if selection.start > 0 {
            let doc = self.remove_text(selection.block, selection.start - 1, 1);
            return (doc, true);
        }
        match self.block_index(selection.block) {
            Some(idx) if idx > 0 => (self.merge_into_previous(idx), true),
            _ => (self, false),
        }
    }

    /// Forward delete: the selection, the character at the caret, or merge
    /// the next block into this one.
    pub fn delete_forward(self) -> (Self, bool) {
        let selection = self.selection;
        if !selection.is_collapsed() {
            return (self.delete_selection(), true);
        }
        let Some(idx) = self.block_index(selection.block) else {
            return (self, false);
        };
        if selection.start < self.blocks[idx].len() {
            let doc = self.remove_text(selection.block, selection.start, 1);
            return (doc, true);
        }
        if idx + 1 < self.blocks.len() {
            let mut doc = self.merge_into_previous(idx + 1);
            doc.selection = selection;
            return (doc, true);
        }
        (self, false)
    }

    /// Move the caret, collapsing any selection.
    #[must_use]
    pub fn move_caret(self, motion: Motion) -> Self {
        let selection = self.selection;
        let idx = self.block_index(selection.block).unwrap_or(0);
        let len = self.blocks[idx].len();
        let last = self.blocks.len() - 1;
        let target = match motion {
            Motion::Left if !selection.is_collapsed() => Selection::caret(selection.block, selection.start),
            Motion::Right if !selection.is_collapsed() => Selection::caret(selection.block, selection.end),
            Motion::Left if selection.start > 0 => Selection::caret(selection.block, selection.start - 1),
            Motion::Left if idx > 0 => {
                let prev = &self.blocks[idx - 1];
                Selection::caret(prev.id(), prev.len())
            }
            Motion::Right if selection.end < len => Selection::caret(selection.block, selection.end + 1),
            Motion::Right if idx < last => Selection::caret(self.blocks[idx + 1].id(), 0),
            Motion::Up if idx > 0 => Selection::caret(self.blocks[idx - 1].id(), selection.start),
            Motion::Down if idx < last => Selection::caret(self.blocks[idx + 1].id(), selection.start),
            Motion::Home => Selection::caret(selection.block, 0),
            Motion::End => Selection::caret(selection.block, len),
            _ => Selection::caret(selection.block, selection.start),
        };
        self.set_selection(target)
    }

    /// Remove a ranged selection, leaving a caret at its start.
    #[must_use]
    pub fn delete_selection(self) -> Self {
        let selection = self.selection;
        if selection.is_collapsed() {
            return self;
        }
        let mut doc = self.remove_text(selection.block, selection.start, selection.end - selection.start);
        doc.selection = Selection::caret(selection.block, selection.start);
        doc
    }

    fn merge_into_previous(mut self, idx: usize) -> Self {
        let block = self.blocks.remove(idx);
        let prev = self.blocks.remove(idx - 1);
        let caret = prev.len();
        let prev_id = prev.id();
        self.blocks.insert(idx - 1, prev.merge(block));
        self.selection = Selection::caret(prev_id, caret);
        self
    }

    fn map_block(mut self, id: BlockId, f: impl FnOnce(Block) -> Block) -> Self {
        if let Some(idx) = self.block_index(id) {
            let block = self.blocks.remove(idx);
            self.blocks.insert(idx, f(block));
        }
        self
    }

    fn clear_style_overrides(&mut self) {
        for block in &mut self.blocks {
            block.clear_current_styles();
        }
    }

    fn mint_id(&mut self) -> BlockId {
        let id = BlockId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::StyleRange;

    fn doc_with(texts: &[&str]) -> Document {
        Document::from_blocks(
            texts
                .iter()
                .map(|text| Block::new(BlockId::new(0), *text))
                .collect(),
        )
    }

    fn caret_at(doc: Document, block_idx: usize, offset: usize) -> Document {
        let id = doc.blocks()[block_idx].id();
        doc.set_selection(Selection::caret(id, offset))
    }

    #[test]
    fn test_empty_document_has_one_block_with_caret() {
        let doc = Document::empty();
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.selection(), Selection::caret(doc.blocks()[0].id(), 0));
    }

    #[test]
    fn test_from_blocks_assigns_unique_ids() {
        let doc = doc_with(&["a", "b", "c"]);
        let ids: Vec<_> = doc.blocks().iter().map(Block::id).collect();
        assert_eq!(ids, vec![BlockId::new(0), BlockId::new(1), BlockId::new(2)]);
    }

    #[test]
    fn test_replace_block_preserves_order() {
        let doc = doc_with(&["one", "two", "three"]);
        let id = doc.blocks()[1].id();
        let doc = doc.replace_block(id, Block::new(id, "TWO"));
        assert_eq!(doc.plain_text(), "one\nTWO\nthree");
    }

    #[test]
    fn test_split_block_moves_caret_to_new_block() {
        let doc = doc_with(&["helloworld"]);
        let id = doc.blocks()[0].id();
        let doc = doc.split_block(id, 5);
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.blocks()[0].text(), "hello");
        assert_eq!(doc.blocks()[1].text(), "world");
        assert_ne!(doc.blocks()[1].id(), id);
        assert_eq!(doc.selection(), Selection::caret(doc.blocks()[1].id(), 0));
    }

    #[test]
    fn test_split_block_ids_stay_unique_after_repeated_splits() {
        let doc = doc_with(&["abc"]);
        let id = doc.blocks()[0].id();
        let doc = doc.split_block(id, 1);
        let doc = doc.split_block(id, 0);
        let mut ids: Vec<_> = doc.blocks().iter().map(Block::id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_current_styles_come_from_previous_char() {
        let block = Block::new(BlockId::new(0), "abcd").toggle_style(0..2, InlineStyle::Bold);
        let doc = Document::from_blocks(vec![block]);
        let doc = caret_at(doc, 0, 2);
        assert!(doc.current_inline_styles().contains(InlineStyle::Bold));
        let doc = caret_at(doc, 0, 3);
        assert!(doc.current_inline_styles().is_empty());
        let doc = caret_at(doc, 0, 0);
        assert!(doc.current_inline_styles().contains(InlineStyle::Bold));
    }

    #[test]
    fn test_toggle_on_caret_sets_override_for_next_char() {
        let doc = Document::empty().toggle_inline_style(InlineStyle::HeaderOne);
        assert!(doc.current_inline_styles().contains(InlineStyle::HeaderOne));
        assert_eq!(doc.blocks()[0].text(), "");

        let doc = doc.insert_text("Hi");
        assert_eq!(
            doc.blocks()[0].style_ranges(),
            &[StyleRange::new(InlineStyle::HeaderOne, 0, 2)]
        );
        // Typing continues the style through the previous character.
        let doc = doc.insert_text("!");
        assert_eq!(
            doc.blocks()[0].style_ranges(),
            &[StyleRange::new(InlineStyle::HeaderOne, 0, 3)]
        );
    }

    #[test]
    fn test_toggle_on_range_styles_selected_chars() {
        let doc = doc_with(&["hello"]);
        let id = doc.blocks()[0].id();
        let doc = doc
            .set_selection(Selection {
                block: id,
                start: 1,
                end: 3,
            })
            .toggle_inline_style(InlineStyle::Underline);
        assert_eq!(
            doc.blocks()[0].style_ranges(),
            &[StyleRange::new(InlineStyle::Underline, 1, 2)]
        );
    }

    #[test]
    fn test_selection_change_clears_override() {
        let doc = Document::empty()
            .insert_text("ab")
            .toggle_inline_style(InlineStyle::Bold);
        assert!(doc.current_inline_styles().contains(InlineStyle::Bold));
        let doc = doc.move_caret(Motion::Left);
        assert!(doc.current_inline_styles().is_empty());
    }

    #[test]
    fn test_set_selection_clamps_and_orders() {
        let doc = doc_with(&["abc"]);
        let id = doc.blocks()[0].id();
        let doc = doc.set_selection(Selection {
            block: id,
            start: 10,
            end: 1,
        });
        assert_eq!(doc.selection().start, 1);
        assert_eq!(doc.selection().end, 3);
    }

    #[test]
    fn test_set_selection_ignores_unknown_block() {
        let doc = doc_with(&["abc"]);
        let before = doc.selection();
        let doc = doc.set_selection(Selection::caret(BlockId::new(99), 0));
        assert_eq!(doc.selection(), before);
    }

    #[test]
    fn test_remove_text_shifts_caret() {
        let doc = caret_at(doc_with(&["ab#cd"]), 0, 4);
        let id = doc.blocks()[0].id();
        let doc = doc.remove_text(id, 2, 1);
        assert_eq!(doc.blocks()[0].text(), "abcd");
        assert_eq!(doc.selection().start, 3);
    }

    #[test]
    fn test_insert_text_replaces_range() {
        let doc = doc_with(&["hello"]);
        let id = doc.blocks()[0].id();
        let doc = doc
            .set_selection(Selection {
                block: id,
                start: 1,
                end: 4,
            })
            .insert_text("ipp");
        assert_eq!(doc.blocks()[0].text(), "hippo");
        assert_eq!(doc.selection(), Selection::caret(id, 4));
    }

    #[test]
    fn test_insert_text_with_newlines_splits_blocks() {
        let doc = Document::empty().insert_text("one\ntwo\r\nthree");
        assert_eq!(doc.plain_text(), "one\ntwo\nthree");
        assert_eq!(doc.blocks().len(), 3);
        assert_eq!(doc.selection().start, 5);
    }

    #[test]
    fn test_delete_backward_removes_char() {
        let doc = caret_at(doc_with(&["abc"]), 0, 2);
        let (doc, changed) = doc.delete_backward();
        assert!(changed);
        assert_eq!(doc.blocks()[0].text(), "ac");
        assert_eq!(doc.selection().start, 1);
    }

    #[test]
    fn test_delete_backward_merges_blocks() {
        let doc = caret_at(doc_with(&["ab", "cd"]), 1, 0);
        let (doc, changed) = doc.delete_backward();
        assert!(changed);
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].text(), "abcd");
        assert_eq!(doc.selection(), Selection::caret(doc.blocks()[0].id(), 2));
    }

    #[test]
    fn test_delete_backward_at_document_start_is_noop() {
        let doc = doc_with(&["ab"]);
        let (after, changed) = doc.clone().delete_backward();
        assert!(!changed);
        assert_eq!(after, doc);
    }

    #[test]
    fn test_delete_forward_merges_next_block() {
        let doc = caret_at(doc_with(&["ab", "cd"]), 0, 2);
        let (doc, changed) = doc.delete_forward();
        assert!(changed);
        assert_eq!(doc.plain_text(), "abcd");
        assert_eq!(doc.selection().start, 2);
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let doc = caret_at(doc_with(&["ab"]), 0, 2);
        let (_, changed) = doc.delete_forward();
        assert!(!changed);
    }

    #[test]
    fn test_move_caret_wraps_between_blocks() {
        let doc = caret_at(doc_with(&["ab", "cd"]), 0, 2);
        let doc = doc.move_caret(Motion::Right);
        assert_eq!(doc.selection(), Selection::caret(doc.blocks()[1].id(), 0));
        let doc = doc.move_caret(Motion::Left);
        assert_eq!(doc.selection(), Selection::caret(doc.blocks()[0].id(), 2));
    }

    #[test]
    fn test_move_caret_vertical_clamps_offset() {
        let doc = caret_at(doc_with(&["hello", "hi"]), 0, 4);
        let doc = doc.move_caret(Motion::Down);
        assert_eq!(doc.selection(), Selection::caret(doc.blocks()[1].id(), 2));
    }

    #[test]
    fn test_move_home_and_end() {
        let doc = caret_at(doc_with(&["hello"]), 0, 2);
        let doc = doc.move_caret(Motion::End);
        assert_eq!(doc.selection().start, 5);
        let doc = doc.move_caret(Motion::Home);
        assert_eq!(doc.selection().start, 0);
    }

    #[test]
    fn test_char_count_spans_blocks() {
        let doc = doc_with(&["ab", "cde"]);
        assert_eq!(doc.char_count(), 5);
    }
}
