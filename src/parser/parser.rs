//! Recursive descent parser for Rill
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST.
//!
//! Tokens must be in textual order. Heredoc bodies and terminators are
//! treated as trivia, so they attach to whatever node is open where they
//! fall in the text.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder, TextRange, TextSize};

use super::engine::Features;
use super::errors::{Diagnostic, ErrorCode, ParseContext, RelatedInfo, format_context_error};
use super::lexer::{LexToken, Lexer};
use super::syntax_kind::{SyntaxKind, SyntaxNode};
use crate::base::constants::MAX_NESTING_DEPTH;

/// Parse result containing the green tree and any diagnostics
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub diagnostics: Vec<Diagnostic>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.level.is_error())
    }
}

/// Parse Rill source code into a CST with every language feature enabled
pub fn parse(input: &str) -> Parse {
    parse_with(input, Features::all())
}

/// Parse Rill source code, gating syntax by `features`
///
/// Lexer and parser diagnostics are merged in source order.
pub fn parse_with(input: &str, features: Features) -> Parse {
    let lexed = Lexer::new(input, features).tokenize();
    let mut parse = parse_tokens(&lexed.textual(), features);
    let mut diagnostics = lexed.diagnostics;
    diagnostics.append(&mut parse.diagnostics);
    diagnostics.sort_by_key(|d| d.range.start());
    parse.diagnostics = diagnostics;
    parse
}

/// Parse an already lexed, textually ordered token slice
pub(crate) fn parse_tokens(tokens: &[LexToken<'_>], features: Features) -> Parse {
    let mut parser = Parser::new(tokens, features);
    parser.parse_source_file();
    parser.finish()
}

/// Binding power of a binary operator, lowest first
fn binary_precedence(kind: SyntaxKind) -> Option<u8> {
    use SyntaxKind::*;
    Some(match kind {
        OR_KW | PIPE_PIPE => 1,
        AND_KW | AMP_AMP => 2,
        EQ_EQ | BANG_EQ => 3,
        LT | GT | LT_EQ | GT_EQ => 4,
        SHL => 5,
        PLUS | MINUS => 6,
        STAR | SLASH | PERCENT => 7,
        _ => return None,
    })
}

fn can_start_expr(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        INTEGER
            | FLOAT
            | STRING
            | SYMBOL
            | HEREDOC_BEG
            | TRUE_KW
            | FALSE_KW
            | NIL_KW
            | SELF_KW
            | IDENT
            | CONSTANT
            | L_PAREN
            | L_BRACKET
            | MINUS
            | BANG
            | NOT_KW
            | IF_KW
            | UNLESS_KW
            | WHILE_KW
            | UNTIL_KW
            | DEF_KW
            | ERROR
    )
}

/// Tokens that may start the argument of a parenthesis-free call: `puts x`
fn can_start_command_arg(kind: SyntaxKind) -> bool {
    use SyntaxKind::*;
    matches!(
        kind,
        INTEGER
            | FLOAT
            | STRING
            | SYMBOL
            | HEREDOC_BEG
            | TRUE_KW
            | FALSE_KW
            | NIL_KW
            | SELF_KW
            | IDENT
            | CONSTANT
            | BANG
            | NOT_KW
    )
}

fn modifier_node(kind: SyntaxKind) -> Option<SyntaxKind> {
    match kind {
        SyntaxKind::IF_KW => Some(SyntaxKind::IF_EXPR),
        SyntaxKind::UNLESS_KW => Some(SyntaxKind::UNLESS_EXPR),
        SyntaxKind::WHILE_KW => Some(SyntaxKind::WHILE_EXPR),
        SyntaxKind::UNTIL_KW => Some(SyntaxKind::UNTIL_EXPR),
        _ => None,
    }
}

/// The parser state
struct Parser<'t, 'a> {
    tokens: &'t [LexToken<'a>],
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    diagnostics: Vec<Diagnostic>,
    features: Features,
    contexts: Vec<ParseContext>,
    depth: u32,
    /// End of the last significant token consumed
    last_end: TextSize,
    /// Set once a fatal diagnostic is recorded; the rest of the input is skipped
    aborted: bool,
}

impl<'t, 'a> Parser<'t, 'a> {
    fn new(tokens: &'t [LexToken<'a>], features: Features) -> Self {
        Self {
            tokens,
            pos: 0,
            builder: GreenNodeBuilder::new(),
            diagnostics: Vec::new(),
            features,
            contexts: Vec::new(),
            depth: 0,
            last_end: TextSize::new(0),
            aborted: false,
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            diagnostics: self.diagnostics,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn peek_index(&self) -> Option<usize> {
        (self.pos..self.tokens.len()).find(|&i| !self.tokens[i].kind.is_trivia())
    }

    /// Kind of the next significant token
    fn peek(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .filter(|t| !t.kind.is_trivia())
            .nth(n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    fn peek_range(&self) -> TextRange {
        match self.peek_index() {
            Some(i) => self.tokens[i].range(),
            None => TextRange::empty(self.end_offset()),
        }
    }

    fn describe_current(&self) -> String {
        match self.peek_index().map(|i| &self.tokens[i]) {
            None => "end of input".to_string(),
            Some(t) if t.kind == SyntaxKind::NEWLINE => "newline".to_string(),
            Some(t) => format!("'{}'", t.text),
        }
    }

    fn end_offset(&self) -> TextSize {
        self.tokens
            .last()
            .map(|t| t.range().end())
            .unwrap_or_default()
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    fn at_any(&self, kinds: &[SyntaxKind]) -> bool {
        kinds.contains(&self.peek())
    }

    fn at_eof(&self) -> bool {
        self.peek() == SyntaxKind::EOF
    }

    /// Whether `kind` is next once newlines are ignored
    fn at_past_newlines(&self, kind: SyntaxKind) -> bool {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .find(|t| !t.kind.is_trivia() && t.kind != SyntaxKind::NEWLINE)
            .is_some_and(|t| t.kind == kind)
    }

    fn context(&self) -> ParseContext {
        self.contexts.last().copied().unwrap_or_default()
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    /// Consume leading trivia and the next significant token.
    fn bump(&mut self) {
        self.skip_trivia();
        if let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.last_end = token.range().end();
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_trivia(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            if !token.kind.is_trivia() {
                break;
            }
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(SyntaxKind::NEWLINE) {
            self.bump();
        }
    }

    fn skip_separators(&mut self) {
        while self.peek().is_separator() {
            self.bump();
        }
    }

    fn bump_remaining(&mut self) {
        while let Some(token) = self.tokens.get(self.pos) {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        if !self.aborted {
            self.diagnostics.push(diagnostic);
        }
    }

    fn error(&mut self, code: ErrorCode, message: impl Into<String>) {
        let range = self.peek_range();
        self.push_diagnostic(Diagnostic::new(message, range, code));
    }

    /// Report the current token as unexpected in the current context
    fn unexpected(&mut self, code: ErrorCode) {
        let found = self.describe_current();
        let range = self.peek_range();
        let diagnostic = format_context_error(&found, self.context(), code, range);
        self.push_diagnostic(diagnostic);
    }

    /// Wrap tokens up to a recovery point in an ERROR node
    fn recover(&mut self, recovery: &[SyntaxKind]) {
        self.start_node(SyntaxKind::ERROR);
        // Always consume at least one token to make progress
        let mut consumed = false;
        while !self.at_eof() && !self.at_any(recovery) {
            self.bump();
            consumed = true;
        }
        if !consumed && !self.at_eof() {
            self.bump();
        }
        self.finish_node();
    }

    /// Enter one nesting level. Returns false when the parse must stop.
    fn enter(&mut self) -> bool {
        if self.aborted {
            return false;
        }
        if self.depth >= MAX_NESTING_DEPTH {
            let range = self.peek_range();
            self.push_diagnostic(Diagnostic::new(
                format!("nesting deeper than {} levels", MAX_NESTING_DEPTH),
                range,
                ErrorCode::E0206,
            ));
            self.aborted = true;
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    /// Start a node at the next significant token
    fn start_node(&mut self, kind: SyntaxKind) {
        self.skip_trivia();
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    fn checkpoint(&mut self) -> Checkpoint {
        self.skip_trivia();
        self.builder.checkpoint()
    }

    fn wrap(&mut self, checkpoint: Checkpoint, kind: SyntaxKind) {
        self.builder.start_node_at(checkpoint, kind.into());
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar: statements
    // =========================================================================

    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SOURCE_FILE.into());
        self.parse_statements(&[], ParseContext::TopLevel);
        if self.peek_index().is_some() {
            // Only reachable after a fatal diagnostic
            self.start_node(SyntaxKind::ERROR);
            while self.peek_index().is_some() {
                self.bump();
            }
            self.finish_node();
        }
        self.bump_remaining();
        self.finish_node();
    }

    /// Statements up to one of `terminators` or end of input
    fn parse_statements(&mut self, terminators: &[SyntaxKind], context: ParseContext) {
        self.contexts.push(context);
        let mut unused_literal: Option<TextRange> = None;
        let mut after_return = false;

        loop {
            self.skip_separators();
            if self.aborted || self.at_eof() || self.at_any(terminators) {
                break;
            }

            if let Some(range) = unused_literal.take() {
                self.push_diagnostic(Diagnostic::from_code(ErrorCode::W0101, range));
            }
            if after_return {
                let range = self.peek_range();
                self.push_diagnostic(Diagnostic::from_code(ErrorCode::W0102, range));
                after_return = false;
            }

            let start_pos = self.pos;
            let start = self.peek_range().start();
            let kind = self.parse_statement();

            if self.pos == start_pos {
                self.recover(context.recovery_tokens());
                continue;
            }

            match kind {
                Some(SyntaxKind::LITERAL) => {
                    unused_literal = Some(TextRange::new(start, self.last_end));
                }
                Some(SyntaxKind::RETURN_EXPR) => after_return = true,
                _ => {}
            }

            let next = self.peek();
            if !(next == SyntaxKind::EOF || next.is_separator() || terminators.contains(&next))
                && !self.aborted
            {
                let found = self.describe_current();
                self.error(
                    ErrorCode::E0205,
                    format!("unexpected {}; expected newline or ';' after statement", found),
                );
                self.recover(context.recovery_tokens());
            }
        }

        self.contexts.pop();
    }

    /// One statement with any trailing `if`/`unless`/`while`/`until` modifiers.
    /// Returns the kind of the outermost node built.
    fn parse_statement(&mut self) -> Option<SyntaxKind> {
        let checkpoint = self.checkpoint();
        let mut kind = match self.peek() {
            SyntaxKind::RETURN_KW => {
                self.parse_return();
                Some(SyntaxKind::RETURN_EXPR)
            }
            SyntaxKind::IDENT if self.nth(1) == SyntaxKind::EQ => {
                self.parse_assignment();
                Some(SyntaxKind::ASSIGNMENT)
            }
            _ => self.parse_expr(),
        };

        while let Some(node) = modifier_node(self.peek()) {
            if self.aborted {
                break;
            }
            self.bump();
            self.parse_condition();
            self.wrap(checkpoint, node);
            kind = Some(node);
        }
        kind
    }

    fn parse_return(&mut self) {
        self.start_node(SyntaxKind::RETURN_EXPR);
        self.bump();
        if can_start_expr(self.peek()) && modifier_node(self.peek()).is_none() {
            self.parse_expr();
            while self.eat(SyntaxKind::COMMA) {
                self.skip_newlines();
                self.parse_operand();
            }
        }
        self.finish_node();
    }

    fn parse_assignment(&mut self) {
        self.start_node(SyntaxKind::ASSIGNMENT);
        self.bump(); // name
        self.bump(); // =
        self.skip_newlines();
        self.parse_operand();
        self.finish_node();
    }

    /// An expression that must be present, reporting E0402 when it is not
    fn parse_operand(&mut self) -> Option<SyntaxKind> {
        if can_start_expr(self.peek()) {
            self.parse_expr()
        } else {
            let found = self.describe_current();
            self.error(
                ErrorCode::E0402,
                format!("missing operand; found {}", found),
            );
            None
        }
    }

    /// Condition of `if`/`unless`/`while`/`until`, with its optional `then`/`do`
    fn parse_condition(&mut self) {
        self.contexts.push(ParseContext::Expression);
        if can_start_expr(self.peek()) {
            self.parse_expr();
        } else {
            self.unexpected(ErrorCode::E0401);
        }
        self.contexts.pop();
        if !self.eat(SyntaxKind::THEN_KW) {
            self.eat(SyntaxKind::DO_KW);
        }
    }

    /// A `BODY` node holding statements up to one of `terminators`
    fn parse_body(&mut self, terminators: &[SyntaxKind], context: ParseContext) {
        if !self.enter() {
            return;
        }
        self.start_node(SyntaxKind::BODY);
        self.parse_statements(terminators, context);
        self.finish_node();
        self.leave();
    }

    fn expect_end(&mut self, opener: TextRange, what: &str) {
        if self.eat(SyntaxKind::END_KW) {
            return;
        }
        let found = self.describe_current();
        let range = self.peek_range();
        self.push_diagnostic(
            Diagnostic::new(
                format!("missing 'end' for {}; found {}", what, found),
                range,
                ErrorCode::E0204,
            )
            .with_related(RelatedInfo::new(format!("{} opened here", what), opener))
            .with_hint("close the block with 'end'"),
        );
    }

    // =========================================================================
    // Grammar: definitions and control flow
    // =========================================================================

    fn parse_method_def(&mut self) {
        self.start_node(SyntaxKind::METHOD_DEF);
        let opener = self.peek_range();
        self.bump(); // def

        if self.at(SyntaxKind::SELF_KW) && self.nth(1) == SyntaxKind::DOT {
            self.bump();
            self.bump();
        }
        if matches!(self.peek(), SyntaxKind::IDENT | SyntaxKind::CONSTANT) {
            self.bump();
        } else {
            let found = self.describe_current();
            self.error(
                ErrorCode::E0301,
                format!("expected method name after 'def', found {}", found),
            );
        }

        if self.at(SyntaxKind::L_PAREN) {
            self.parse_param_list();
        }

        if self.at(SyntaxKind::EQ) {
            if !self.features.endless_def {
                let range = self.peek_range();
                self.push_diagnostic(Diagnostic::from_code(ErrorCode::E0503, range));
            }
            self.bump();
            self.skip_newlines();
            self.parse_operand();
            self.finish_node();
            return;
        }

        self.parse_body(&[SyntaxKind::END_KW], ParseContext::MethodBody);
        self.expect_end(opener, "'def'");
        self.finish_node();
    }

    fn parse_param_list(&mut self) {
        self.start_node(SyntaxKind::PARAM_LIST);
        let open = self.peek_range();
        self.bump(); // (
        self.contexts.push(ParseContext::ParameterList);
        self.skip_newlines();

        while !self.aborted && !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            if self.at(SyntaxKind::IDENT) {
                self.start_node(SyntaxKind::PARAM);
                self.bump();
                self.finish_node();
            } else {
                self.unexpected(ErrorCode::E0302);
                self.recover(ParseContext::ParameterList.recovery_tokens());
            }
            self.skip_newlines();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
            self.skip_newlines();
        }

        self.contexts.pop();
        if !self.eat(SyntaxKind::R_PAREN) {
            let range = self.peek_range();
            self.push_diagnostic(
                Diagnostic::from_code(ErrorCode::E0202, range)
                    .with_related(RelatedInfo::new("'(' opened here", open)),
            );
        }
        self.finish_node();
    }

    fn parse_if(&mut self) {
        self.start_node(SyntaxKind::IF_EXPR);
        let opener = self.peek_range();
        self.bump(); // if
        self.parse_condition();

        let branch_end = [SyntaxKind::ELSIF_KW, SyntaxKind::ELSE_KW, SyntaxKind::END_KW];
        self.parse_body(&branch_end, ParseContext::ConditionalBody);

        while self.at(SyntaxKind::ELSIF_KW) && !self.aborted {
            self.start_node(SyntaxKind::ELSIF_CLAUSE);
            self.bump();
            self.parse_condition();
            self.parse_body(&branch_end, ParseContext::ConditionalBody);
            self.finish_node();
        }
        self.parse_else_clause();

        self.expect_end(opener, "'if'");
        self.finish_node();
    }

    fn parse_unless(&mut self) {
        self.start_node(SyntaxKind::UNLESS_EXPR);
        let opener = self.peek_range();
        self.bump(); // unless
        self.parse_condition();
        self.parse_body(
            &[SyntaxKind::ELSE_KW, SyntaxKind::END_KW],
            ParseContext::ConditionalBody,
        );
        self.parse_else_clause();
        self.expect_end(opener, "'unless'");
        self.finish_node();
    }

    fn parse_else_clause(&mut self) {
        if self.at(SyntaxKind::ELSE_KW) {
            self.start_node(SyntaxKind::ELSE_CLAUSE);
            self.bump();
            self.parse_body(&[SyntaxKind::END_KW], ParseContext::ConditionalBody);
            self.finish_node();
        }
    }

    fn parse_loop(&mut self) {
        let (node, what) = if self.at(SyntaxKind::WHILE_KW) {
            (SyntaxKind::WHILE_EXPR, "'while'")
        } else {
            (SyntaxKind::UNTIL_EXPR, "'until'")
        };
        self.start_node(node);
        let opener = self.peek_range();
        self.bump();
        self.parse_condition();
        self.parse_body(&[SyntaxKind::END_KW], ParseContext::LoopBody);
        self.expect_end(opener, what);
        self.finish_node();
    }

    // =========================================================================
    // Grammar: expressions
    // =========================================================================

    fn parse_expr(&mut self) -> Option<SyntaxKind> {
        self.parse_binary(1)
    }

    /// Precedence climbing over left-associative binary operators
    fn parse_binary(&mut self, min_prec: u8) -> Option<SyntaxKind> {
        if !self.enter() {
            return None;
        }
        let checkpoint = self.checkpoint();
        let mut kind = self.parse_prefix();

        while !self.aborted {
            let Some(prec) = binary_precedence(self.peek()) else {
                break;
            };
            if prec < min_prec {
                break;
            }
            self.bump(); // operator
            self.skip_newlines();
            if can_start_expr(self.peek()) {
                self.parse_binary(prec + 1);
            } else {
                let found = self.describe_current();
                self.error(
                    ErrorCode::E0402,
                    format!("missing right-hand operand; found {}", found),
                );
            }
            self.wrap(checkpoint, SyntaxKind::BINARY_EXPR);
            kind = Some(SyntaxKind::BINARY_EXPR);
        }

        self.leave();
        kind
    }

    fn parse_prefix(&mut self) -> Option<SyntaxKind> {
        if !matches!(
            self.peek(),
            SyntaxKind::MINUS | SyntaxKind::BANG | SyntaxKind::NOT_KW
        ) {
            return self.parse_postfix();
        }
        if !self.enter() {
            return None;
        }
        self.start_node(SyntaxKind::PREFIX_EXPR);
        self.bump();
        if can_start_expr(self.peek()) {
            self.parse_prefix();
        } else {
            self.unexpected(ErrorCode::E0401);
        }
        self.finish_node();
        self.leave();
        Some(SyntaxKind::PREFIX_EXPR)
    }

    /// Method calls chained with `.` or `&.`
    fn parse_postfix(&mut self) -> Option<SyntaxKind> {
        let checkpoint = self.checkpoint();
        let mut kind = self.parse_primary()?;

        while !self.aborted && matches!(self.peek(), SyntaxKind::DOT | SyntaxKind::SAFE_NAV) {
            if self.at(SyntaxKind::SAFE_NAV) && !self.features.safe_navigation {
                let range = self.peek_range();
                self.push_diagnostic(Diagnostic::from_code(ErrorCode::E0502, range));
            }
            self.bump();
            self.skip_newlines();

            let name = self.peek();
            if matches!(name, SyntaxKind::IDENT | SyntaxKind::CONSTANT) || name.is_keyword() {
                self.bump();
                if self.at(SyntaxKind::L_PAREN) {
                    self.parse_arg_list();
                }
            } else {
                let found = self.describe_current();
                self.error(
                    ErrorCode::E0404,
                    format!("expected method name after '.', found {}", found),
                );
            }
            self.wrap(checkpoint, SyntaxKind::METHOD_CALL);
            kind = SyntaxKind::METHOD_CALL;
        }

        Some(kind)
    }

    fn parse_primary(&mut self) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        match self.peek() {
            INTEGER | FLOAT | STRING | SYMBOL | TRUE_KW | FALSE_KW | NIL_KW | SELF_KW => {
                self.start_node(LITERAL);
                self.bump();
                self.finish_node();
                Some(LITERAL)
            }
            HEREDOC_BEG => {
                self.start_node(HEREDOC_LITERAL);
                self.bump();
                self.finish_node();
                Some(HEREDOC_LITERAL)
            }
            IDENT | CONSTANT => Some(self.parse_name_or_call()),
            L_PAREN => {
                self.parse_paren();
                Some(PAREN_EXPR)
            }
            L_BRACKET => {
                self.parse_array();
                Some(ARRAY_EXPR)
            }
            IF_KW => {
                self.parse_if();
                Some(IF_EXPR)
            }
            UNLESS_KW => {
                self.parse_unless();
                Some(UNLESS_EXPR)
            }
            WHILE_KW | UNTIL_KW => {
                let kind = if self.at(WHILE_KW) { WHILE_EXPR } else { UNTIL_EXPR };
                self.parse_loop();
                Some(kind)
            }
            DEF_KW => {
                self.parse_method_def();
                Some(METHOD_DEF)
            }
            ERROR => {
                // Already reported by the lexer
                self.start_node(ERROR);
                self.bump();
                self.finish_node();
                None
            }
            _ => {
                let code = if self.context().is_in_body() {
                    ErrorCode::E0201
                } else {
                    ErrorCode::E0401
                };
                self.unexpected(code);
                None
            }
        }
    }

    fn parse_name_or_call(&mut self) -> SyntaxKind {
        let is_ident = self.at(SyntaxKind::IDENT);
        let next = self.nth(1);

        if next == SyntaxKind::L_PAREN {
            self.start_node(SyntaxKind::CALL_EXPR);
            self.bump();
            self.parse_arg_list();
            self.finish_node();
            SyntaxKind::CALL_EXPR
        } else if is_ident && can_start_command_arg(next) {
            self.start_node(SyntaxKind::CALL_EXPR);
            self.bump();
            self.parse_command_args();
            self.finish_node();
            SyntaxKind::CALL_EXPR
        } else {
            self.start_node(SyntaxKind::NAME_REF);
            self.bump();
            self.finish_node();
            SyntaxKind::NAME_REF
        }
    }

    fn parse_arg_list(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        let open = self.peek_range();
        self.bump(); // (
        self.contexts.push(ParseContext::ArgumentList);
        self.skip_newlines();

        while !self.aborted && !self.at_eof() && !self.at(SyntaxKind::R_PAREN) {
            if can_start_expr(self.peek()) {
                self.parse_expr();
            } else {
                self.unexpected(ErrorCode::E0401);
                self.recover(ParseContext::ArgumentList.recovery_tokens());
            }
            self.skip_newlines();
            if !self.eat(SyntaxKind::COMMA) {
                break;
            }
            self.skip_newlines();
        }

        self.contexts.pop();
        if !self.eat(SyntaxKind::R_PAREN) {
            let range = self.peek_range();
            self.push_diagnostic(
                Diagnostic::from_code(ErrorCode::E0403, range)
                    .with_related(RelatedInfo::new("'(' opened here", open)),
            );
        }
        self.finish_node();
    }

    fn parse_command_args(&mut self) {
        self.start_node(SyntaxKind::ARG_LIST);
        self.parse_expr();
        while !self.aborted && self.eat(SyntaxKind::COMMA) {
            self.skip_newlines();
            self.parse_operand();
        }
        self.finish_node();
    }

    fn parse_paren(&mut self) {
        if !self.enter() {
            return;
        }
        self.start_node(SyntaxKind::PAREN_EXPR);
        let open = self.peek_range();
        self.bump(); // (
        self.contexts.push(ParseContext::Expression);
        self.skip_newlines();

        if !self.at(SyntaxKind::R_PAREN) {
            if can_start_expr(self.peek()) {
                self.parse_expr();
            } else {
                self.unexpected(ErrorCode::E0401);
            }
        }

        self.contexts.pop();
        if self.at_past_newlines(SyntaxKind::R_PAREN) {
            self.skip_newlines();
            self.bump();
        } else {
            let range = self.peek_range();
            self.push_diagnostic(
                Diagnostic::from_code(ErrorCode::E0202, range)
                    .with_related(RelatedInfo::new("'(' opened here", open)),
            );
        }
        self.finish_node();
        self.leave();
    }

    fn parse_array(&mut self) {
        if !self.enter() {
            return;
        }
        self.start_node(SyntaxKind::ARRAY_EXPR);
        let open = self.peek_range();
        self.bump(); // [
        self.contexts.push(ParseContext::ArrayLiteral);
        self.skip_newlines();

        while !self.aborted && !self.at_eof() && !self.at(SyntaxKind::R_BRACKET) {
            if can_start_expr(self.peek()) {
                self.parse_expr();
            } else {
                self.unexpected(ErrorCode::E0401);
                self.recover(ParseContext::ArrayLiteral.recovery_tokens());
            }
            if !self.at_past_newlines(SyntaxKind::COMMA) {
                break;
            }
            self.skip_newlines();
            self.bump(); // ,
            self.skip_newlines();
        }

        self.contexts.pop();
        if self.at_past_newlines(SyntaxKind::R_BRACKET) {
            self.skip_newlines();
            self.bump();
        } else {
            let range = self.peek_range();
            self.push_diagnostic(
                Diagnostic::from_code(ErrorCode::E0203, range)
                    .with_related(RelatedInfo::new("'[' opened here", open)),
            );
        }
        self.finish_node();
        self.leave();
    }
}
