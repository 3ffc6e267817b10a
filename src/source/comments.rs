//! Comments, the line → comment index, and comment association.

use rowan::{TextRange, TextSize};
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::tokens::Token;
use crate::base::LineIndex;
use crate::parser::{SyntaxKind, SyntaxNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommentKind {
    /// `# ...` to the end of the line
    Line,
    /// `=begin` ... `=end`
    Block,
}

/// A comment and the lines it spans (1-based, inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Comment {
    pub text: SmolStr,
    pub range: TextRange,
    pub line: u32,
    pub last_line: u32,
    pub kind: CommentKind,
}

impl Comment {
    pub fn from_token(token: &Token, line_index: &LineIndex) -> Self {
        let kind = if token.text.starts_with("=begin") {
            CommentKind::Block
        } else {
            CommentKind::Line
        };
        Self {
            text: token.text.clone(),
            range: token.range,
            line: token.line,
            last_line: line_index.line(token.range.end()),
            kind,
        }
    }

    pub fn begin_offset(&self) -> TextSize {
        self.range.start()
    }

    pub fn end_offset(&self) -> TextSize {
        self.range.end()
    }

    pub fn is_block(&self) -> bool {
        self.kind == CommentKind::Block
    }
}

/// Line → position in the comment list.
///
/// Built once in emission order. When several comments start on the same
/// line the later one replaces the earlier.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    by_line: FxHashMap<u32, usize>,
}

impl CommentIndex {
    pub fn new(comments: &[Comment]) -> Self {
        let mut by_line = FxHashMap::default();
        for (position, comment) in comments.iter().enumerate() {
            by_line.insert(comment.line, position);
        }
        Self { by_line }
    }

    pub fn get(&self, line: u32) -> Option<usize> {
        self.by_line.get(&line).copied()
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.by_line.contains_key(&line)
    }

    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}

/// Comments attached to one statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentAssociation {
    /// Range of the statement node
    pub range: TextRange,
    pub kind: SyntaxKind,
    /// Comments between the previous sibling statement and this one
    pub leading: Vec<Comment>,
    /// A comment after the statement on its last line
    pub trailing: Option<Comment>,
}

impl CommentAssociation {
    pub fn is_empty(&self) -> bool {
        self.leading.is_empty() && self.trailing.is_none()
    }
}

/// Associate comments with the statements of every statement list in `root`.
///
/// Statements are the node children of the root and of each `BODY`; error
/// nodes are skipped. The result is ordered by statement start.
pub fn associate(
    root: &SyntaxNode,
    comments: &[Comment],
    line_index: &LineIndex,
) -> Vec<CommentAssociation> {
    let mut sorted: Vec<&Comment> = comments.iter().collect();
    sorted.sort_by_key(|c| c.begin_offset());

    let mut associations = Vec::new();
    let containers = root
        .descendants()
        .filter(|n| matches!(n.kind(), SyntaxKind::SOURCE_FILE | SyntaxKind::BODY));

    for container in containers {
        let mut cursor = container.text_range().start();
        for statement in container
            .children()
            .filter(|n| n.kind() != SyntaxKind::ERROR)
        {
            let range = statement.text_range();
            let from = sorted.partition_point(|c| c.begin_offset() < cursor);
            let to = sorted.partition_point(|c| c.begin_offset() < range.start());
            let leading = sorted[from..to.max(from)]
                .iter()
                .map(|c| (*c).clone())
                .collect();

            let last_line = line_index.line(range.end());
            let after = sorted.partition_point(|c| c.begin_offset() < range.end());
            let trailing = sorted
                .get(after)
                .filter(|c| c.line == last_line)
                .map(|c| (*c).clone());

            cursor = trailing
                .as_ref()
                .map(Comment::end_offset)
                .unwrap_or(range.end());
            associations.push(CommentAssociation {
                range,
                kind: statement.kind(),
                leading,
                trailing,
            });
        }
    }

    associations.sort_by_key(|a| a.range.start());
    associations
}
