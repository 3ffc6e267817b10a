//! Processed sources: a parsed buffer with indexed, queryable access to its
//! lines, tokens, comments, and diagnostics.
//!
//! ## Conventions
//!
//! - Token and comment line numbers are 1-based.
//! - [`ProcessedSource::lines`], [`ProcessedSource::line_at`] and
//!   [`ProcessedSource::slice`] index lines from zero, so the line of a token
//!   `t` is `line_at(t.line - 1)`.
//! - [`ProcessedSource::line_indentation`] takes a 1-based line number.
//!
//! Derived indices are built on first use and kept for the lifetime of the
//! value. A processed source is never mutated after construction and is
//! `Send + Sync`.

mod comments;
mod lines;
mod options;
mod orchestrator;
mod ranged;
mod tokens;

pub use comments::{Comment, CommentAssociation, CommentIndex, CommentKind, associate};
pub use lines::LineTable;
pub use options::ParseOptions;
pub use orchestrator::ParseState;
pub use ranged::Ranged;
pub use tokens::{Token, TokenIndex};

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::slice::SliceIndex;
use std::sync::OnceLock;

use rowan::GreenNode;
use sha2::{Digest, Sha256};

use crate::base::constants::STRING_SOURCE_NAME;
use crate::base::{BufferEncodingError, SourceBuffer};
use crate::error::{ConfigurationError, SourceError};
use crate::parser::{Diagnostic, Diagnostics, LanguageVersion, ParserEngine, SyntaxNode};

/// A parsed source file or string
#[derive(Debug)]
pub struct ProcessedSource {
    raw_source: Vec<u8>,
    path: Option<PathBuf>,
    name: String,
    buffer: Option<SourceBuffer>,
    ast: Option<GreenNode>,
    tokens: Vec<Token>,
    comments: Vec<Comment>,
    diagnostics: Diagnostics,
    parser_error: Option<BufferEncodingError>,
    language_version: LanguageVersion,
    parser_engine: ParserEngine,
    state: ParseState,

    lines: OnceLock<LineTable>,
    token_index: OnceLock<TokenIndex>,
    comment_index: OnceLock<CommentIndex>,
    associations: OnceLock<Vec<CommentAssociation>>,
}

impl ProcessedSource {
    /// Parse `source` as Rill `language_version` with `engine`.
    ///
    /// Only an unsupported (version, engine) pair is an error. Bad syntax and
    /// bad encoding are recorded on the result.
    pub fn new(
        source: impl AsRef<[u8]>,
        language_version: LanguageVersion,
        path: Option<&Path>,
        engine: ParserEngine,
    ) -> Result<Self, ConfigurationError> {
        Self::with_options(source, path, &ParseOptions::new(language_version, engine))
    }

    /// Like [`ProcessedSource::new`], with the version and engine given as tags.
    pub fn from_tags(
        source: impl AsRef<[u8]>,
        language_version: &str,
        path: Option<&Path>,
        engine: &str,
    ) -> Result<Self, ConfigurationError> {
        Self::with_options(source, path, &ParseOptions::from_tags(language_version, engine)?)
    }

    /// Read `path` as raw bytes and parse it.
    pub fn from_file(
        path: impl AsRef<Path>,
        language_version: LanguageVersion,
        engine: ParserEngine,
    ) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|e| SourceError::io(path, e))?;
        Ok(Self::new(raw, language_version, Some(path), engine)?)
    }

    pub fn with_options(
        source: impl AsRef<[u8]>,
        path: Option<&Path>,
        options: &ParseOptions,
    ) -> Result<Self, ConfigurationError> {
        let strategy = options.strategy()?;
        let raw_source = source.as_ref().to_vec();
        let name = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| STRING_SOURCE_NAME.to_string());

        let outcome = orchestrator::run(&raw_source, &name, strategy);

        Ok(Self {
            raw_source,
            path: path.map(Path::to_path_buf),
            name,
            buffer: outcome.buffer,
            ast: outcome.ast,
            tokens: outcome.tokens,
            comments: outcome.comments,
            diagnostics: outcome.diagnostics,
            parser_error: outcome.parser_error,
            language_version: options.language_version,
            parser_engine: options.engine,
            state: outcome.state,
            lines: OnceLock::new(),
            token_index: OnceLock::new(),
            comment_index: OnceLock::new(),
            associations: OnceLock::new(),
        })
    }

    // =========================================================================
    // Stored results
    // =========================================================================

    pub fn raw_source(&self) -> &[u8] {
        &self.raw_source
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The buffer name: the path, or `(string)`
    pub fn file_path(&self) -> &str {
        &self.name
    }

    /// Absent when the bytes could not be decoded
    pub fn buffer(&self) -> Option<&SourceBuffer> {
        self.buffer.as_ref()
    }

    /// Root of the syntax tree, if the source has any statements
    pub fn ast(&self) -> Option<SyntaxNode> {
        self.ast.clone().map(SyntaxNode::new_root)
    }

    pub fn green(&self) -> Option<&GreenNode> {
        self.ast.as_ref()
    }

    /// Tokens in emission order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Comments in emission order
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.as_slice()
    }

    pub fn parser_error(&self) -> Option<&BufferEncodingError> {
        self.parser_error.as_ref()
    }

    pub fn language_version(&self) -> LanguageVersion {
        self.language_version
    }

    pub fn parser_engine(&self) -> ParserEngine {
        self.parser_engine
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    pub fn valid_syntax(&self) -> bool {
        self.diagnostics.valid_syntax(self.parser_error.is_some())
    }

    pub fn blank(&self) -> bool {
        self.ast.is_none()
    }

    /// Lowercase hex SHA-256 of the raw bytes
    pub fn checksum(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(&self.raw_source);
        format!("{:x}", hasher.finalize())
    }

    // =========================================================================
    // Lines
    // =========================================================================

    fn line_table(&self) -> &LineTable {
        self.lines.get_or_init(|| {
            let source_lines = self
                .buffer
                .as_ref()
                .map(SourceBuffer::source_lines)
                .unwrap_or_default();
            LineTable::build(&source_lines, self.tokens.last().map(|t| t.line))
        })
    }

    pub fn lines(&self) -> &[String] {
        self.line_table().as_slice()
    }

    /// Zero-based line
    pub fn line_at(&self, index: usize) -> Option<&str> {
        self.line_table().get(index)
    }

    /// Zero-based slice of lines
    pub fn slice<R>(&self, range: R) -> Option<&[String]>
    where
        R: SliceIndex<[String], Output = [String]>,
    {
        self.line_table().slice(range)
    }

    pub fn start_with(&self, prefix: &str) -> bool {
        self.line_table().starts_with(prefix)
    }

    /// The line before the token's line; `None` on the first line
    pub fn preceding_line(&self, token: &Token) -> Option<&str> {
        let index = (token.line as usize).checked_sub(2)?;
        self.line_at(index)
    }

    pub fn current_line(&self, token: &Token) -> Option<&str> {
        let index = (token.line as usize).checked_sub(1)?;
        self.line_at(index)
    }

    pub fn following_line(&self, token: &Token) -> Option<&str> {
        self.line_at(token.line as usize)
    }

    /// Leading whitespace on a 1-based line
    pub fn line_indentation(&self, line_number: usize) -> Option<usize> {
        self.line_table().indentation(line_number)
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    fn token_index(&self) -> &TokenIndex {
        self.token_index.get_or_init(|| TokenIndex::new(&self.tokens))
    }

    /// Tokens stably sorted by begin offset
    pub fn sorted_tokens(&self) -> &[Token] {
        self.token_index().sorted()
    }

    pub fn first_token_index(&self, range: impl Ranged) -> Option<usize> {
        self.token_index().first_index(range.source_range())
    }

    pub fn last_token_index(&self, range: impl Ranged) -> Option<usize> {
        self.token_index().last_index(range.source_range())
    }

    pub fn tokens_within(&self, range: impl Ranged) -> &[Token] {
        self.token_index().within(range.source_range())
    }

    pub fn first_token_of(&self, range: impl Ranged) -> Option<&Token> {
        self.token_index().first_of(range.source_range())
    }

    pub fn last_token_of(&self, range: impl Ranged) -> Option<&Token> {
        self.token_index().last_of(range.source_range())
    }

    // =========================================================================
    // Comments
    // =========================================================================

    fn comment_index(&self) -> &CommentIndex {
        self.comment_index
            .get_or_init(|| CommentIndex::new(&self.comments))
    }

    /// Comment starting on a 1-based line
    pub fn comment_at_line(&self, line: u32) -> Option<&Comment> {
        self.comment_index()
            .get(line)
            .and_then(|i| self.comments.get(i))
    }

    pub fn line_with_comment(&self, line: u32) -> bool {
        self.comment_index().contains_line(line)
    }

    /// Comments on the given lines, skipping lines without one
    pub fn each_comment_in_lines(
        &self,
        lines: RangeInclusive<u32>,
    ) -> impl Iterator<Item = &Comment> + '_ {
        lines.filter_map(move |line| self.comment_at_line(line))
    }

    /// Whether any line spanned by `range` has a comment
    pub fn contains_comment(&self, range: impl Ranged) -> bool {
        let Some(buffer) = &self.buffer else {
            return false;
        };
        let range = range.source_range();
        let first = buffer.line_for(range.start());
        let last = buffer.line_for(range.end());
        self.each_comment_in_lines(first..=last).next().is_some()
    }

    /// Comments on lines up to and including `line`
    pub fn comments_before_line(&self, line: u32) -> Vec<&Comment> {
        self.each_comment_in_lines(0..=line).collect()
    }

    /// Leading and trailing comments of every statement
    pub fn comment_associations(&self) -> &[CommentAssociation] {
        self.associations.get_or_init(|| {
            match (self.ast(), &self.buffer) {
                (Some(root), Some(buffer)) => {
                    associate(&root, &self.comments, buffer.line_index())
                }
                _ => Vec::new(),
            }
        })
    }

    /// The association of the statement occupying exactly `range`
    pub fn comments_for(&self, range: impl Ranged) -> Option<&CommentAssociation> {
        let range = range.source_range();
        let associations = self.comment_associations();
        let start = associations.partition_point(|a| a.range.start() < range.start());
        associations[start..]
            .iter()
            .take_while(|a| a.range.start() == range.start())
            .find(|a| a.range == range)
    }
}
