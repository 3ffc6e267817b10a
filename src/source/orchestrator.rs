//! One parse invocation: buffer, tokenize, normalize.

use rowan::GreenNode;
use tracing::{debug, trace, warn};

use super::comments::Comment;
use super::tokens::Token;
use crate::base::{BufferEncodingError, SourceBuffer};
use crate::parser::{
    Diagnostics, DiagnosticsEngine, ParserStrategy, SyntaxKind, Tokenized,
};

/// Progress of a parse invocation
///
/// `Unparsed → Buffering → {BufferFailed | Tokenizing} → {TokenizeFailed | Completed}`.
/// There are no retries: a new invocation starts from `Unparsed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseState {
    #[default]
    Unparsed,
    Buffering,
    /// The bytes could not be decoded; see `parser_error`
    BufferFailed,
    Tokenizing,
    /// Tokenization was aborted by a syntax error; diagnostics are partial
    TokenizeFailed,
    Completed,
}

impl ParseState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::BufferFailed | Self::TokenizeFailed | Self::Completed
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unparsed => "unparsed",
            Self::Buffering => "buffering",
            Self::BufferFailed => "buffer-failed",
            Self::Tokenizing => "tokenizing",
            Self::TokenizeFailed => "tokenize-failed",
            Self::Completed => "completed",
        }
    }

    fn can_advance_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Unparsed, Self::Buffering)
                | (Self::Buffering, Self::BufferFailed | Self::Tokenizing)
                | (Self::Tokenizing, Self::TokenizeFailed | Self::Completed)
        )
    }

    fn advance(&mut self, next: Self) {
        debug_assert!(
            self.can_advance_to(next),
            "invalid parse state transition {} -> {}",
            self.as_str(),
            next.as_str()
        );
        trace!("[PARSE] {} -> {}", self.as_str(), next.as_str());
        *self = next;
    }
}

/// Everything a parse invocation produces
#[derive(Debug)]
pub(crate) struct ParseOutcome {
    pub buffer: Option<SourceBuffer>,
    pub ast: Option<GreenNode>,
    pub tokens: Vec<Token>,
    pub comments: Vec<Comment>,
    pub diagnostics: Diagnostics,
    pub parser_error: Option<BufferEncodingError>,
    pub state: ParseState,
}

/// Run `strategy` over `raw`, capturing every problem as data.
pub(crate) fn run(raw: &[u8], name: &str, strategy: ParserStrategy) -> ParseOutcome {
    let mut state = ParseState::Unparsed;
    state.advance(ParseState::Buffering);

    let buffer = match SourceBuffer::new(name, raw) {
        Ok(buffer) => buffer,
        Err(err) => {
            warn!("[PARSE] {}: {}", name, err);
            state.advance(ParseState::BufferFailed);
            return ParseOutcome {
                buffer: None,
                ast: None,
                tokens: Vec::new(),
                comments: Vec::new(),
                diagnostics: Diagnostics::new(),
                parser_error: Some(err),
                state,
            };
        }
    };

    state.advance(ParseState::Tokenizing);
    let mut diagnostics = Diagnostics::new();
    let result = {
        let mut engine = DiagnosticsEngine::collecting_into(&mut diagnostics);
        engine.set_ignore_warnings(false);
        strategy
            .tokenize(&buffer, &mut engine)
            .map(|tokenized| normalize(tokenized, &buffer))
    };

    let (ast, tokens, comments) = match result {
        Ok(parts) => {
            state.advance(ParseState::Completed);
            parts
        }
        Err(err) => {
            // The diagnostic is already in the collector
            debug!("[PARSE] {}: aborted: {}", name, err);
            state.advance(ParseState::TokenizeFailed);
            (None, Vec::new(), Vec::new())
        }
    };

    debug!(
        "[PARSE] {}: {} tokens, {} comments, {} diagnostics",
        name,
        tokens.len(),
        comments.len(),
        diagnostics.len()
    );

    ParseOutcome {
        buffer: Some(buffer),
        ast,
        tokens,
        comments,
        diagnostics,
        parser_error: None,
        state,
    }
}

fn normalize(
    tokenized: Tokenized<'_>,
    buffer: &SourceBuffer,
) -> (Option<GreenNode>, Vec<Token>, Vec<Comment>) {
    let line_index = buffer.line_index();
    let tokens: Vec<Token> = tokenized
        .tokens
        .iter()
        .filter(|t| t.kind.is_emitted())
        .map(|t| Token::from_lexed(t, line_index))
        .collect();
    let comments = tokens
        .iter()
        .filter(|t| t.kind == SyntaxKind::COMMENT)
        .map(|t| Comment::from_token(t, line_index))
        .collect();

    // A file without statements is the parser's empty sentinel
    let has_statements = tokenized
        .ast
        .children()
        .any(|child| child.as_node().is_some());
    let ast = has_statements.then_some(tokenized.ast);

    (ast, tokens, comments)
}
