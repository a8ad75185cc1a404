//! Inline style kinds and their visual attributes.

use std::fmt;

/// One of the four inline styles a marker can toggle.
///
/// Declaration order is the precedence order used when a block split
/// clears an active style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InlineStyle {
    /// Large bold heading text (`#`)
    HeaderOne,
    /// Bold text (`*`)
    Bold,
    /// Red text (`**`)
    DoubleEmphasis,
    /// Underlined text (`***`)
    Underline,
}

impl InlineStyle {
    /// All styles in precedence order.
    pub const ALL: [Self; 4] = [
        Self::HeaderOne,
        Self::Bold,
        Self::DoubleEmphasis,
        Self::Underline,
    ];

    /// Name used in the persisted record.
    pub const fn name(self) -> &'static str {
        match self {
            Self::HeaderOne => "HEADER_ONE",
            Self::Bold => "BOLD",
            Self::DoubleEmphasis => "DOUBLE_EMPHASIS",
            Self::Underline => "UNDERLINE",
        }
    }

    /// Parse a persisted style name.
    ///
    /// `HEADERONE` and `REDLINE` are accepted for records written by older
    /// versions of the editor.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "HEADER_ONE" | "HEADERONE" => Some(Self::HeaderOne),
            "BOLD" => Some(Self::Bold),
            "DOUBLE_EMPHASIS" | "REDLINE" => Some(Self::DoubleEmphasis),
            "UNDERLINE" => Some(Self::Underline),
            _ => None,
        }
    }

    /// Fixed style-to-visual mapping handed to renderers.
    pub const fn visual(self) -> VisualAttributes {
        match self {
            Self::HeaderOne => VisualAttributes {
                large: true,
                bold: true,
                color: None,
                underline: false,
            },
            Self::Bold => VisualAttributes {
                large: false,
                bold: true,
                color: None,
                underline: false,
            },
            Self::DoubleEmphasis => VisualAttributes {
                large: false,
                bold: false,
                color: Some(TextColor::Red),
                underline: false,
            },
            Self::Underline => VisualAttributes {
                large: false,
                bold: false,
                color: None,
                underline: true,
            },
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::HeaderOne => 1,
            Self::Bold => 1 << 1,
            Self::DoubleEmphasis => 1 << 2,
            Self::Underline => 1 << 3,
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Text colors a style may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Red,
}

/// Renderer-independent description of how styled text looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisualAttributes {
    pub large: bool,
    pub bold: bool,
    pub color: Option<TextColor>,
    pub underline: bool,
}

impl VisualAttributes {
    /// Combine the attributes of every style in `styles`.
    pub fn for_styles(styles: StyleSet) -> Self {
        styles.iter().fold(Self::default(), |acc, style| {
            let v = style.visual();
            Self {
                large: acc.large || v.large,
                bold: acc.bold || v.bold,
                color: v.color.or(acc.color),
                underline: acc.underline || v.underline,
            }
        })
    }
}

/// A small copyable set of inline styles.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StyleSet(u8);

impl StyleSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, style: InlineStyle) -> bool {
        self.0 & style.bit() != 0
    }

    #[must_use]
    pub const fn with(self, style: InlineStyle) -> Self {
        Self(self.0 | style.bit())
    }

    #[must_use]
    pub const fn without(self, style: InlineStyle) -> Self {
        Self(self.0 & !style.bit())
    }

    /// Flip membership of `style`.
    #[must_use]
    pub const fn toggled(self, style: InlineStyle) -> Self {
        Self(self.0 ^ style.bit())
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in precedence order.
    pub fn iter(self) -> impl Iterator<Item = InlineStyle> {
        InlineStyle::ALL
            .into_iter()
            .filter(move |style| self.contains(*style))
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

impl fmt::Debug for StyleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
