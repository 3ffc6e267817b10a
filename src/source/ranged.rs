//! Anything that occupies a byte range of the source.

use std::ops::Range;

use rowan::{TextRange, TextSize};

use super::comments::Comment;
use super::tokens::Token;
use crate::parser::{Diagnostic, SyntaxNode, SyntaxToken};

/// A value that can be located in the source by a byte range.
///
/// Range queries on a processed source accept any `Ranged` value, so a raw
/// range, a token, a comment, or a syntax node can be passed interchangeably.
pub trait Ranged {
    fn source_range(&self) -> TextRange;
}

impl Ranged for TextRange {
    fn source_range(&self) -> TextRange {
        *self
    }
}

impl Ranged for Range<u32> {
    fn source_range(&self) -> TextRange {
        let start = TextSize::new(self.start);
        TextRange::new(start, TextSize::new(self.end).max(start))
    }
}

impl Ranged for Range<TextSize> {
    fn source_range(&self) -> TextRange {
        TextRange::new(self.start, self.end.max(self.start))
    }
}

impl Ranged for Token {
    fn source_range(&self) -> TextRange {
        self.range
    }
}

impl Ranged for Comment {
    fn source_range(&self) -> TextRange {
        self.range
    }
}

impl Ranged for Diagnostic {
    fn source_range(&self) -> TextRange {
        self.range
    }
}

impl Ranged for SyntaxNode {
    fn source_range(&self) -> TextRange {
        self.text_range()
    }
}

impl Ranged for SyntaxToken {
    fn source_range(&self) -> TextRange {
        self.text_range()
    }
}

impl<T: Ranged + ?Sized> Ranged for &T {
    fn source_range(&self) -> TextRange {
        (**self).source_range()
    }
}
