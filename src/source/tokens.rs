//! Public tokens and the position-sorted token index.

use rowan::{TextRange, TextSize};
use smol_str::SmolStr;

use crate::base::LineIndex;
use crate::parser::{LexToken, SyntaxKind};

/// A token as exposed by a processed source
///
/// `line` is 1-based and `column` a 0-based byte column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: SyntaxKind,
    pub text: SmolStr,
    pub range: TextRange,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn from_lexed(token: &LexToken<'_>, line_index: &LineIndex) -> Self {
        let position = line_index.line_col(token.offset);
        Self {
            kind: token.kind,
            text: SmolStr::new(token.text),
            range: token.range(),
            line: position.line,
            column: position.col,
        }
    }

    pub fn begin_offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn end_offset(&self) -> TextSize {
        self.range.end()
    }

    pub fn is_comment(&self) -> bool {
        self.kind == SyntaxKind::COMMENT
    }

    pub fn is_newline(&self) -> bool {
        self.kind == SyntaxKind::NEWLINE
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }
}

/// Tokens sorted by begin offset, with range lookups.
///
/// Heredoc bodies are emitted before the rest of their opener's line, so the
/// emitted stream is only mostly sorted. The index re-sorts it with a stable
/// sort: tokens that begin at the same offset keep their emission order.
/// Searches assume non-overlapping tokens, which makes end offsets monotonic
/// in the sorted order as well.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenIndex {
    sorted: Vec<Token>,
}

impl TokenIndex {
    pub fn new(tokens: &[Token]) -> Self {
        let mut sorted = tokens.to_vec();
        sorted.sort_by_key(Token::begin_offset);
        Self { sorted }
    }

    pub fn sorted(&self) -> &[Token] {
        &self.sorted
    }

    /// Index of the first token beginning at or after `range.start()`
    pub fn first_index(&self, range: TextRange) -> Option<usize> {
        let index = self
            .sorted
            .partition_point(|t| t.begin_offset() < range.start());
        (index < self.sorted.len()).then_some(index)
    }

    /// Index of the first token ending at or after `range.end()`
    pub fn last_index(&self, range: TextRange) -> Option<usize> {
        let index = self.sorted.partition_point(|t| t.end_offset() < range.end());
        (index < self.sorted.len()).then_some(index)
    }

    /// Sorted tokens from `first_index` through `last_index`, inclusive.
    ///
    /// Empty when no token begins inside the range. A range that ends after
    /// the last token extends to the end of the stream.
    pub fn within(&self, range: TextRange) -> &[Token] {
        let Some(first) = self.first_index(range) else {
            return &[];
        };
        if self.sorted[first].begin_offset() >= range.end() {
            return &[];
        }
        let last = self
            .last_index(range)
            .unwrap_or(self.sorted.len().saturating_sub(1));
        if first > last {
            return &[];
        }
        &self.sorted[first..=last]
    }

    pub fn first_of(&self, range: TextRange) -> Option<&Token> {
        self.first_index(range).and_then(|i| self.sorted.get(i))
    }

    pub fn last_of(&self, range: TextRange) -> Option<&Token> {
        self.last_index(range).and_then(|i| self.sorted.get(i))
    }
}
