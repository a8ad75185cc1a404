//! Blocks of text and their inline style ranges.
//!
//! All offsets are character (Unicode scalar value) offsets into the
//! block text. Operations consume the block and return the edited copy.

use std::fmt;
use std::ops::Range;

use crate::error::{Error, Result};

use super::style::{InlineStyle, StyleSet};

/// Stable identifier of a block within a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlockId(u64);

impl BlockId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// A span of characters rendered with one inline style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRange {
    pub style: InlineStyle,
    pub offset: usize,
    pub length: usize,
}

impl StyleRange {
    pub const fn new(style: InlineStyle, offset: usize, length: usize) -> Self {
        Self {
            style,
            offset,
            length,
        }
    }

    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.length)
    }

    const fn contains(&self, offset: usize) -> bool {
        offset >= self.offset && offset < self.end()
    }
}

/// One line of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    id: BlockId,
    text: String,
    /// Sorted by `(style, offset)`; same-style ranges never overlap.
    style_ranges: Vec<StyleRange>,
    /// Styles for the next character typed at the caret, when set explicitly.
    current_styles: Option<StyleSet>,
}

impl Block {
    /// Create an unstyled block.
    pub fn new(id: BlockId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            style_ranges: Vec::new(),
            current_styles: None,
        }
    }

    /// Create a block from stored parts, validating every range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptDocument`] when a range is empty, extends past
    /// the end of the text, or overlaps another range of the same style.
    pub fn from_parts(id: BlockId, text: impl Into<String>, ranges: Vec<StyleRange>) -> Result<Self> {
        let text = text.into();
        let len = text.chars().count();
        for range in &ranges {
            if range.length == 0 {
                return Err(Error::CorruptDocument(format!(
                    "empty {} range at offset {} in block {id}",
                    range.style, range.offset
                )));
            }
            match range.offset.checked_add(range.length) {
                Some(end) if end <= len => {}
                _ => {
                    return Err(Error::CorruptDocument(format!(
                        "{} range at offset {} with length {} exceeds block {id} length {len}",
                        range.style, range.offset, range.length
                    )));
                }
            }
        }
        let mut block = Self {
            id,
            text,
            style_ranges: ranges,
            current_styles: None,
        };
        block.sort_ranges();
        if let Some(pair) = block
            .style_ranges
            .windows(2)
            .find(|pair| pair[0].style == pair[1].style && pair[1].offset < pair[0].end())
        {
            return Err(Error::CorruptDocument(format!(
                "overlapping {} ranges at offsets {} and {} in block {id}",
                pair[0].style, pair[0].offset, pair[1].offset
            )));
        }
        Ok(block)
    }

    pub const fn id(&self) -> BlockId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style_ranges(&self) -> &[StyleRange] {
        &self.style_ranges
    }

    pub const fn current_styles(&self) -> Option<StyleSet> {
        self.current_styles
    }

    /// Length of the text in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Same text and ranges, ignoring the id and the caret override.
    pub fn same_content(&self, other: &Self) -> bool {
        self.text == other.text && self.style_ranges == other.style_ranges
    }

    #[must_use]
    pub fn with_id(mut self, id: BlockId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub const fn with_current_styles(mut self, styles: Option<StyleSet>) -> Self {
        self.current_styles = styles;
        self
    }

    pub(super) fn clear_current_styles(&mut self) {
        self.current_styles = None;
    }

    /// Styles applied to the character at `offset`.
    pub fn styles_at(&self, offset: usize) -> StyleSet {
        self.style_ranges
            .iter()
            .filter(|range| range.contains(offset))
            .map(|range| range.style)
            .collect()
    }

    /// Flip membership of `style` for every character in `range`.
    ///
    /// Ranges of `style` are rebuilt from the flipped characters, so they
    /// stay disjoint and adjacent runs merge. An empty range is a no-op.
    #[must_use]
    pub fn toggle_style(mut self, range: Range<usize>, style: InlineStyle) -> Self {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len);
        if start >= end {
            return self;
        }
        let mut mask = self.style_mask(style);
        for flag in &mut mask[start..end] {
            *flag = !*flag;
        }
        self.rebuild_style(style, &mask);
        self
    }

    /// Delete `remove_len` characters starting at `remove_start`.
    ///
    /// Ranges after the cut shift left by the removed length, ranges
    /// overlapping it shrink by the overlap, and ranges inside it vanish.
    #[must_use]
    pub fn remove_text(mut self, remove_start: usize, remove_len: usize) -> Self {
        let len = self.len();
        let start = remove_start.min(len);
        let end = remove_start.saturating_add(remove_len).min(len);
        let removed = end - start;
        if removed == 0 {
            return self;
        }

        let byte_start = byte_index(&self.text, start);
        let byte_end = byte_index(&self.text, end);
        self.text.drain(byte_start..byte_end);

        self.style_ranges = self
            .style_ranges
            .into_iter()
            .filter_map(|range| {
                if range.end() <= start {
                    Some(range)
                } else if range.offset >= end {
                    Some(StyleRange::new(range.style, range.offset - removed, range.length))
                } else {
                    let overlap = range.end().min(end) - range.offset.max(start);
                    let length = range.length - overlap;
                    (length > 0).then(|| {
                        StyleRange::new(range.style, range.offset.min(start), length)
                    })
                }
            })
            .collect();
        self
    }

    /// Insert `text` at character offset `at`, carrying exactly `styles`.
    ///
    /// Ranges of other styles that span the insertion point are split
    /// around the new characters; ranges of `styles` grow to cover them.
    #[must_use]
    pub fn insert_text(mut self, at: usize, text: &str, styles: StyleSet) -> Self {
        let inserted = text.chars().count();
        if inserted == 0 {
            return self;
        }
        let at = at.min(self.len());
        let byte_at = byte_index(&self.text, at);
        self.text.insert_str(byte_at, text);

        let mut ranges = Vec::with_capacity(self.style_ranges.len() + 1);
        for range in self.style_ranges {
            if range.end() <= at {
                ranges.push(range);
            } else if range.offset >= at {
                ranges.push(StyleRange::new(range.style, range.offset + inserted, range.length));
            } else {
                ranges.push(StyleRange::new(range.style, range.offset, at - range.offset));
                ranges.push(StyleRange::new(range.style, at + inserted, range.end() - at));
            }
        }
        self.style_ranges = ranges;

        for style in styles.iter() {
            let mut mask = self.style_mask(style);
            for flag in &mut mask[at..at + inserted] {
                *flag = true;
            }
            self.rebuild_style(style, &mask);
        }
        self
    }

    /// Split at `at`, returning the head (keeping this id) and the tail.
    ///
    /// Both halves are cut with [`Block::remove_text`]; the caret override
    /// travels with the tail.
    pub fn split_off(self, at: usize, tail_id: BlockId) -> (Self, Self) {
        let len = self.len();
        let at = at.min(len);
        let override_styles = self.current_styles;
        let head = self.clone().remove_text(at, len - at).with_current_styles(None);
        let tail = self
            .remove_text(0, at)
            .with_id(tail_id)
            .with_current_styles(override_styles);
        (head, tail)
    }

    /// Append `other` to the end of this block, keeping this id.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        let shift = self.len();
        self.text.push_str(&other.text);
        self.style_ranges.extend(
            other
                .style_ranges
                .into_iter()
                .map(|range| StyleRange::new(range.style, range.offset + shift, range.length)),
        );
        for style in InlineStyle::ALL {
            let mask = self.style_mask(style);
            self.rebuild_style(style, &mask);
        }
        self.current_styles = None;
        self
    }

    fn style_mask(&self, style: InlineStyle) -> Vec<bool> {
        let mut mask = vec![false; self.len()];
        for range in self.style_ranges.iter().filter(|r| r.style == style) {
            let end = range.end().min(mask.len());
            for flag in &mut mask[range.offset.min(end)..end] {
                *flag = true;
            }
        }
        mask
    }

    fn rebuild_style(&mut self, style: InlineStyle, mask: &[bool]) {
        self.style_ranges.retain(|range| range.style != style);
        let mut run_start = None;
        for (idx, flag) in mask.iter().copied().chain(std::iter::once(false)).enumerate() {
            match (flag, run_start) {
                (true, None) => run_start = Some(idx),
                (false, Some(start)) => {
                    self.style_ranges.push(StyleRange::new(style, start, idx - start));
                    run_start = None;
                }
                _ => {}
            }
        }
        self.sort_ranges();
    }

    fn sort_ranges(&mut self) {
        self.style_ranges
            .sort_by_key(|range| (range.style, range.offset, range.length));
    }
}

/// Byte index of a character offset, clamped to the end of the text.
pub fn byte_index(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte_idx, _)| byte_idx)
}
