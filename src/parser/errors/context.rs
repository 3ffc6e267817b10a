//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts to generate more helpful
//! messages that say where in the source structure the error occurred.

use crate::parser::SyntaxKind;

/// Represents the current parsing context
///
/// Used to generate context-aware messages and pick recovery tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// At the top level of a file
    #[default]
    TopLevel,
    /// Inside a `def ... end` body
    MethodBody,
    /// Inside an `if`/`unless` branch
    ConditionalBody,
    /// Inside a `while`/`until` body
    LoopBody,
    /// Parsing a parameter list
    ParameterList,
    /// Parsing an argument list
    ArgumentList,
    /// Parsing an array literal
    ArrayLiteral,
    /// Parsing an expression
    Expression,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::MethodBody => "in method body",
            Self::ConditionalBody => "in conditional branch",
            Self::LoopBody => "in loop body",
            Self::ParameterList => "in parameter list",
            Self::ArgumentList => "in argument list",
            Self::ArrayLiteral => "in array literal",
            Self::Expression => "in expression",
        }
    }

    /// Get a description of what tokens are expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a statement",
            Self::MethodBody | Self::ConditionalBody | Self::LoopBody => "a statement or 'end'",
            Self::ParameterList => "a parameter name",
            Self::ArgumentList => "an argument",
            Self::ArrayLiteral => "an element or ']'",
            Self::Expression => "an expression (literal, name, or operator)",
        }
    }

    /// Get the recovery tokens appropriate for this context
    pub fn recovery_tokens(&self) -> &'static [SyntaxKind] {
        match self {
            Self::TopLevel => &[SyntaxKind::NEWLINE, SyntaxKind::SEMICOLON],
            Self::MethodBody | Self::ConditionalBody | Self::LoopBody => &[
                SyntaxKind::NEWLINE,
                SyntaxKind::SEMICOLON,
                SyntaxKind::END_KW,
                SyntaxKind::ELSE_KW,
                SyntaxKind::ELSIF_KW,
            ],
            Self::ParameterList => &[SyntaxKind::R_PAREN, SyntaxKind::COMMA, SyntaxKind::NEWLINE],
            Self::ArgumentList => &[SyntaxKind::R_PAREN, SyntaxKind::COMMA, SyntaxKind::NEWLINE],
            Self::ArrayLiteral => &[SyntaxKind::R_BRACKET, SyntaxKind::COMMA, SyntaxKind::NEWLINE],
            Self::Expression => &[
                SyntaxKind::NEWLINE,
                SyntaxKind::SEMICOLON,
                SyntaxKind::R_PAREN,
                SyntaxKind::R_BRACKET,
                SyntaxKind::COMMA,
            ],
        }
    }

    /// Check if this context is a statement body
    pub fn is_in_body(&self) -> bool {
        matches!(
            self,
            Self::TopLevel | Self::MethodBody | Self::ConditionalBody | Self::LoopBody
        )
    }
}
