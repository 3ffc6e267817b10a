//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree.

/// All syntax kinds (tokens and nodes) in Rill
///
/// Tokens are leaf nodes (identifiers, keywords, punctuation).
/// Nodes are composite (method definitions, conditionals, calls).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (preserved in the tree but skipped by the grammar)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,
    DATA, // `__END__` and everything after it

    // =========================================================================
    // SIGNIFICANT LAYOUT
    // =========================================================================
    NEWLINE,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,        // name
    CONSTANT,     // Name
    INTEGER,      // 42
    FLOAT,        // 3.14
    STRING,       // "hello" or 'hello'
    SYMBOL,       // :name
    HEREDOC_BEG,  // <<~EOS
    HEREDOC_BODY, // lines between the opener and the terminator
    HEREDOC_END,  // EOS

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_PAREN,    // (
    R_PAREN,    // )
    L_BRACKET,  // [
    R_BRACKET,  // ]
    COMMA,      // ,
    DOT,        // .
    SAFE_NAV,   // &.
    SEMICOLON,  // ;
    EQ,         // =
    EQ_EQ,      // ==
    BANG_EQ,    // !=
    LT,         // <
    GT,         // >
    LT_EQ,      // <=
    GT_EQ,      // >=
    SHL,        // <<
    PLUS,       // +
    MINUS,      // -
    STAR,       // *
    SLASH,      // /
    PERCENT,    // %
    BANG,       // !
    AMP_AMP,    // &&
    PIPE_PIPE,  // ||

    // =========================================================================
    // KEYWORDS
    // =========================================================================
    AND_KW,
    DEF_KW,
    DO_KW,
    ELSE_KW,
    ELSIF_KW,
    END_KW,
    FALSE_KW,
    IF_KW,
    NIL_KW,
    NOT_KW,
    OR_KW,
    RETURN_KW,
    SELF_KW,
    THEN_KW,
    TRUE_KW,
    UNLESS_KW,
    UNTIL_KW,
    WHILE_KW,

    // =========================================================================
    // NODES
    // =========================================================================
    SOURCE_FILE,
    BODY,
    ASSIGNMENT,
    METHOD_DEF,
    PARAM_LIST,
    PARAM,
    IF_EXPR,
    ELSIF_CLAUSE,
    ELSE_CLAUSE,
    UNLESS_EXPR,
    WHILE_EXPR,
    UNTIL_EXPR,
    RETURN_EXPR,
    CALL_EXPR,
    METHOD_CALL,
    ARG_LIST,
    BINARY_EXPR,
    PREFIX_EXPR,
    PAREN_EXPR,
    ARRAY_EXPR,
    LITERAL,
    HEREDOC_LITERAL,
    NAME_REF,

    // Special
    ERROR,
    /// End of input; reported by the parser's lookahead, never stored in a tree
    EOF,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token
    ///
    /// Heredoc bodies and terminators count as trivia for the grammar: they sit
    /// textually after the opener's line and are attached wherever they fall.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::COMMENT | Self::DATA | Self::HEREDOC_BODY | Self::HEREDOC_END
        )
    }

    /// Check if this is a keyword
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::AND_KW as u16) && (self as u16) <= (Self::WHILE_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_PAREN as u16) && (self as u16) <= (Self::PIPE_PIPE as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::INTEGER | Self::FLOAT | Self::STRING | Self::SYMBOL | Self::HEREDOC_BEG
        )
    }

    /// Check if this kind ends a statement
    pub fn is_separator(self) -> bool {
        matches!(self, Self::NEWLINE | Self::SEMICOLON)
    }

    /// Whether a token of this kind appears in the public token stream
    pub fn is_emitted(self) -> bool {
        !matches!(self, Self::WHITESPACE | Self::DATA)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RillLanguage {}

impl rowan::Language for RillLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<RillLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<RillLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<RillLanguage>;
