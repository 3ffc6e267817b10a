//! Logos-based lexer for Rill
//!
//! Fast tokenization using the logos crate, plus the few constructs a regular
//! lexer cannot express on its own:
//!
//! - heredoc bodies, which start after the first token that ends a line
//!   following their opener (a newline, or a `\` line continuation). Their
//!   tokens are emitted right after the opener, before the rest of the
//!   opener's line, so the token stream is not globally sorted by offset;
//! - `=begin` / `=end` block comments, recognised only at the start of a line;
//! - a `__END__` line, after which the remaining text is data.
//!
//! Every byte of the input ends up in exactly one token, so sorting the
//! emitted tokens by offset reproduces the source text.

use std::ops::Range;

use logos::Logos;
use rowan::{TextRange, TextSize};

use super::engine::Features;
use super::errors::{Diagnostic, ErrorCode};
use super::syntax_kind::SyntaxKind;
use crate::base::constants::END_MARKER;

/// A token with its kind, text, and position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexToken<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl LexToken<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Output of one lexer run
#[derive(Debug, Clone, Default)]
pub struct Lexed<'a> {
    /// Tokens in emission order, trivia included
    pub tokens: Vec<LexToken<'a>>,
    /// Lexical diagnostics in the order they were found
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> Lexed<'a> {
    /// Tokens in textual order (stable by offset); the lossless stream the grammar consumes.
    pub fn textual(&self) -> Vec<LexToken<'a>> {
        let mut tokens = self.tokens.clone();
        tokens.sort_by_key(|t| t.offset);
        tokens
    }

    /// Tokens that belong to the public token stream, in emission order.
    pub fn emitted(&self) -> impl Iterator<Item = &LexToken<'a>> + '_ {
        self.tokens.iter().filter(|t| t.kind.is_emitted())
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    source: &'a str,
    features: Features,
    inner: logos::Lexer<'a, LogosToken>,
    tokens: Vec<LexToken<'a>>,
    diagnostics: Vec<Diagnostic>,
    /// Heredocs opened since the last line break, in opening order
    pending: Vec<PendingHeredoc<'a>>,
}

/// A heredoc whose body has not been reached yet
#[derive(Debug, Clone)]
struct PendingHeredoc<'a> {
    id: &'a str,
    indented: bool,
    opener: Range<usize>,
    /// Token index just after the opener, where the body tokens go
    insert_at: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, features: Features) -> Self {
        Self {
            source,
            features,
            inner: LogosToken::lexer(source),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Run the lexer to the end of input (or to `__END__`).
    pub fn tokenize(mut self) -> Lexed<'a> {
        while let Some(result) = self.inner.next() {
            let span = self.inner.span();
            match result {
                Ok(LogosToken::Newline) => self.push(SyntaxKind::NEWLINE, span.clone()),
                Ok(LogosToken::Eq) if self.at_block_comment(span.start) => {
                    self.block_comment(span);
                }
                Ok(LogosToken::Ident) if self.at_end_marker(&span) => {
                    self.data_section(span);
                    break;
                }
                Ok(LogosToken::Heredoc) => self.heredoc(span),
                Ok(LogosToken::UnterminatedString) => {
                    self.push(SyntaxKind::STRING, span.clone());
                    self.diagnostics
                        .push(Diagnostic::from_code(ErrorCode::E0102, self.range(span)));
                }
                Ok(token) => self.push(token.into(), span),
                Err(()) => {
                    let text = &self.source[span.clone()];
                    self.push(SyntaxKind::ERROR, span.clone());
                    self.diagnostics.push(Diagnostic::new(
                        format!("invalid character {:?}", text),
                        self.range(span),
                        ErrorCode::E0101,
                    ));
                }
            }

            let end = self.inner.span().end;
            if self.source.as_bytes()[..end].ends_with(b"\n") {
                self.read_heredoc_bodies(end);
            }
        }
        self.read_heredoc_bodies(self.source.len());

        Lexed {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    fn push(&mut self, kind: SyntaxKind, span: Range<usize>) {
        if let Some(token) = self.token(kind, span) {
            self.tokens.push(token);
        }
    }

    fn token(&self, kind: SyntaxKind, span: Range<usize>) -> Option<LexToken<'a>> {
        let source = self.source;
        (!span.is_empty()).then(|| LexToken {
            kind,
            text: &source[span.clone()],
            offset: TextSize::new(span.start as u32),
        })
    }

    fn range(&self, span: Range<usize>) -> TextRange {
        TextRange::new(
            TextSize::new(span.start as u32),
            TextSize::new(span.end as u32),
        )
    }

    fn at_line_start(&self, offset: usize) -> bool {
        offset == 0 || self.source.as_bytes()[offset - 1] == b'\n'
    }

    /// Offset just past the newline ending the line that contains `offset`.
    fn next_line_start(&self, offset: usize) -> usize {
        self.source[offset..]
            .find('\n')
            .map(|i| offset + i + 1)
            .unwrap_or(self.source.len())
    }

    fn line_end(&self, offset: usize) -> usize {
        self.source[offset..]
            .find('\n')
            .map(|i| offset + i)
            .unwrap_or(self.source.len())
    }

    // =========================================================================
    // Heredocs
    // =========================================================================

    fn heredoc(&mut self, span: Range<usize>) {
        let source = self.source;
        let text = &source[span.clone()];
        let squiggly = text.starts_with("<<~");
        let indented = squiggly || text.starts_with("<<-");
        let id = &text[if indented { 3 } else { 2 }..];

        if squiggly && !self.features.squiggly_heredoc {
            self.diagnostics
                .push(Diagnostic::from_code(ErrorCode::E0501, self.range(span.clone())));
        }
        self.push(SyntaxKind::HEREDOC_BEG, span.clone());
        self.pending.push(PendingHeredoc {
            id,
            indented,
            opener: span,
            insert_at: self.tokens.len(),
        });
    }

    /// Read the bodies of every pending heredoc, one after another, starting
    /// at `body_start`, and move the lexer past them.
    ///
    /// `body_start` must be where the lexer currently stands.
    fn read_heredoc_bodies(&mut self, body_start: usize) {
        if self.pending.is_empty() {
            return;
        }
        let pending = std::mem::take(&mut self.pending);
        let mut pos = body_start;
        let mut bodies = Vec::with_capacity(pending.len());
        for heredoc in &pending {
            let (tokens, next) = self.heredoc_body(heredoc, pos);
            bodies.push((heredoc.insert_at, tokens));
            pos = next;
        }

        // Back to front so earlier insertion points stay valid
        for (at, tokens) in bodies.into_iter().rev() {
            self.tokens.splice(at..at, tokens);
        }
        if pos > body_start {
            self.inner.bump(pos - body_start);
        }
    }

    /// Body, terminator and trailing newline of one heredoc starting at
    /// `body_start`, plus the offset just past them.
    fn heredoc_body(
        &mut self,
        heredoc: &PendingHeredoc<'a>,
        body_start: usize,
    ) -> (Vec<LexToken<'a>>, usize) {
        let len = self.source.len();
        let mut pos = body_start;

        loop {
            if pos >= len {
                let tokens = self
                    .token(SyntaxKind::HEREDOC_BODY, body_start..len)
                    .into_iter()
                    .collect();
                self.diagnostics.push(
                    Diagnostic::new(
                        format!("unterminated heredoc; expected a line with `{}`", heredoc.id),
                        self.range(heredoc.opener.clone()),
                        ErrorCode::E0104,
                    )
                    .with_hint(format!("add a line containing only `{}`", heredoc.id)),
                );
                return (tokens, len);
            }

            let line_end = self.line_end(pos);
            let line = &self.source[pos..line_end];
            let candidate = if heredoc.indented {
                line.trim_start_matches([' ', '\t'])
            } else {
                line
            };

            if candidate == heredoc.id {
                let indent_end = line_end - candidate.len();
                let next = (line_end + 1).min(len);
                let tokens = [
                    self.token(SyntaxKind::HEREDOC_BODY, body_start..pos),
                    self.token(SyntaxKind::WHITESPACE, pos..indent_end),
                    self.token(SyntaxKind::HEREDOC_END, indent_end..line_end),
                    self.token(SyntaxKind::WHITESPACE, line_end..next),
                ]
                .into_iter()
                .flatten()
                .collect();
                return (tokens, next);
            }

            pos = line_end + 1;
        }
    }

    // =========================================================================
    // Block comments and the data section
    // =========================================================================

    fn at_block_comment(&self, offset: usize) -> bool {
        self.at_line_start(offset)
            && self.source[offset..].starts_with("=begin")
            && matches!(
                self.source.as_bytes().get(offset + 6),
                None | Some(b' ' | b'\t' | b'\r' | b'\n')
            )
    }

    fn block_comment(&mut self, span: Range<usize>) {
        let start = span.start;
        let len = self.source.len();
        let mut pos = self.next_line_start(start);

        let end = loop {
            if pos >= len {
                self.diagnostics.push(Diagnostic::from_code(
                    ErrorCode::E0103,
                    self.range(start..start + "=begin".len()),
                ));
                break len;
            }
            let line_end = self.line_end(pos);
            let line = &self.source[pos..line_end];
            if line.starts_with("=end")
                && matches!(line.as_bytes().get(4), None | Some(b' ' | b'\t' | b'\r'))
            {
                break line_end;
            }
            pos = line_end + 1;
        };

        self.push(SyntaxKind::COMMENT, start..end);
        if end > span.end {
            self.inner.bump(end - span.end);
        }
    }

    fn at_end_marker(&self, span: &Range<usize>) -> bool {
        &self.source[span.clone()] == END_MARKER
            && self.at_line_start(span.start)
            && matches!(self.source.as_bytes().get(span.end), None | Some(b'\n'))
    }

    fn data_section(&mut self, span: Range<usize>) {
        self.diagnostics
            .push(Diagnostic::from_code(ErrorCode::I0101, self.range(span.clone())));
        self.push(SyntaxKind::DATA, span.start..self.source.len());
    }
}

/// Tokenize an entire string with every language feature enabled
pub fn tokenize(input: &str) -> Lexed<'_> {
    Lexer::new(input, Features::all()).tokenize()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA AND LAYOUT
    // =========================================================================
    #[regex(r"[ \t\r\f]+")]
    #[regex(r"\\\r?\n")]
    Whitespace,

    #[token("\n")]
    Newline,

    #[regex(r"#[^\n]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-z_][a-zA-Z0-9_]*\??")]
    Ident,

    #[regex(r"[A-Z][a-zA-Z0-9_]*")]
    Constant,

    #[regex(r"[0-9][0-9_]*")]
    Integer,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*([eE][+-]?[0-9]+)?")]
    Float,

    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    #[regex(r"'([^'\\]|\\(.|\n))*'")]
    String,

    #[regex(r#""([^"\\]|\\(.|\n))*"#)]
    #[regex(r"'([^'\\]|\\(.|\n))*")]
    UnterminatedString,

    #[regex(r":[a-zA-Z_][a-zA-Z0-9_]*\??")]
    Symbol,

    #[regex(r"<<[~-]?[A-Z_][A-Z0-9_]*")]
    Heredoc,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("&.")]
    SafeNav,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("<<")]
    Shl,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    #[token("and")]
    AndKw,
    #[token("def")]
    DefKw,
    #[token("do")]
    DoKw,
    #[token("else")]
    ElseKw,
    #[token("elsif")]
    ElsifKw,
    #[token("end")]
    EndKw,
    #[token("false")]
    FalseKw,
    #[token("if")]
    IfKw,
    #[token("nil")]
    NilKw,
    #[token("not")]
    NotKw,
    #[token("or")]
    OrKw,
    #[token("return")]
    ReturnKw,
    #[token("self")]
    SelfKw,
    #[token("then")]
    ThenKw,
    #[token("true")]
    TrueKw,
    #[token("unless")]
    UnlessKw,
    #[token("until")]
    UntilKw,
    #[token("while")]
    WhileKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        use LogosToken::*;
        match token {
            // Trivia and layout
            Whitespace => SyntaxKind::WHITESPACE,
            Newline => SyntaxKind::NEWLINE,
            Comment => SyntaxKind::COMMENT,

            // Literals
            Ident => SyntaxKind::IDENT,
            Constant => SyntaxKind::CONSTANT,
            Integer => SyntaxKind::INTEGER,
            Float => SyntaxKind::FLOAT,
            String | UnterminatedString => SyntaxKind::STRING,
            Symbol => SyntaxKind::SYMBOL,
            Heredoc => SyntaxKind::HEREDOC_BEG,

            // Multi-char punctuation
            SafeNav => SyntaxKind::SAFE_NAV,
            EqEq => SyntaxKind::EQ_EQ,
            BangEq => SyntaxKind::BANG_EQ,
            LtEq => SyntaxKind::LT_EQ,
            GtEq => SyntaxKind::GT_EQ,
            Shl => SyntaxKind::SHL,
            AmpAmp => SyntaxKind::AMP_AMP,
            PipePipe => SyntaxKind::PIPE_PIPE,

            // Single-char punctuation
            LParen => SyntaxKind::L_PAREN,
            RParen => SyntaxKind::R_PAREN,
            LBracket => SyntaxKind::L_BRACKET,
            RBracket => SyntaxKind::R_BRACKET,
            Comma => SyntaxKind::COMMA,
            Dot => SyntaxKind::DOT,
            Semicolon => SyntaxKind::SEMICOLON,
            Eq => SyntaxKind::EQ,
            Lt => SyntaxKind::LT,
            Gt => SyntaxKind::GT,
            Plus => SyntaxKind::PLUS,
            Minus => SyntaxKind::MINUS,
            Star => SyntaxKind::STAR,
            Slash => SyntaxKind::SLASH,
            Percent => SyntaxKind::PERCENT,
            Bang => SyntaxKind::BANG,

            // Keywords
            AndKw => SyntaxKind::AND_KW,
            DefKw => SyntaxKind::DEF_KW,
            DoKw => SyntaxKind::DO_KW,
            ElseKw => SyntaxKind::ELSE_KW,
            ElsifKw => SyntaxKind::ELSIF_KW,
            EndKw => SyntaxKind::END_KW,
            FalseKw => SyntaxKind::FALSE_KW,
            IfKw => SyntaxKind::IF_KW,
            NilKw => SyntaxKind::NIL_KW,
            NotKw => SyntaxKind::NOT_KW,
            OrKw => SyntaxKind::OR_KW,
            ReturnKw => SyntaxKind::RETURN_KW,
            SelfKw => SyntaxKind::SELF_KW,
            ThenKw => SyntaxKind::THEN_KW,
            TrueKw => SyntaxKind::TRUE_KW,
            UnlessKw => SyntaxKind::UNLESS_KW,
            UntilKw => SyntaxKind::UNTIL_KW,
            WhileKw => SyntaxKind::WHILE_KW,
        }
    }
}
