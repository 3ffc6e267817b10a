//! Error code definitions for parser diagnostics
//!
//! Codes follow a naming convention: {level}{category}{number}
//! - E01xx: Lexical errors (invalid tokens, unterminated literals)
//! - E02xx: Structural errors (delimiters, `end`, separators, nesting)
//! - E03xx: Declaration errors (method definitions)
//! - E04xx: Expression errors
//! - E05xx: Syntax not available in the selected language version
//! - W01xx: Warnings
//! - I01xx: Informational notes

use std::fmt;

use super::error::Level;

/// Error codes for parser diagnostics
///
/// Each code represents a specific category of parse condition,
/// enabling filtering, documentation, and tests that pin exact behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,
    /// Unterminated string literal
    E0102,
    /// Unterminated `=begin` block comment
    E0103,
    /// Heredoc without its terminator line
    E0104,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Unexpected token where a statement was expected
    E0201,
    /// Unclosed parenthesis `(`
    E0202,
    /// Unclosed bracket `[`
    E0203,
    /// Missing `end` for a block
    E0204,
    /// Two statements on one line without a separator
    E0205,
    /// Nesting deeper than the parser supports
    E0206,

    // =========================================================================
    // E03xx: Declaration errors
    // =========================================================================
    /// Missing method name after `def`
    E0301,
    /// Invalid parameter in a parameter list
    E0302,

    // =========================================================================
    // E04xx: Expression errors
    // =========================================================================
    /// Expected an expression
    E0401,
    /// Missing right-hand operand
    E0402,
    /// Unclosed call argument list
    E0403,
    /// Missing method name after `.` or `&.`
    E0404,

    // =========================================================================
    // E05xx: Version-gated syntax
    // =========================================================================
    /// Squiggly heredoc `<<~` before Rill 1.1
    E0501,
    /// Safe navigation `&.` before Rill 1.2
    E0502,
    /// Endless method definition before Rill 2.0
    E0503,

    // =========================================================================
    // W01xx: Warnings
    // =========================================================================
    /// Literal used as a statement whose value is discarded
    W0101,
    /// Statement after `return` in the same body
    W0102,

    // =========================================================================
    // I01xx: Informational
    // =========================================================================
    /// Data after `__END__` is not parsed
    I0101,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0201")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0103 => "E0103",
            Self::E0104 => "E0104",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0501 => "E0501",
            Self::E0502 => "E0502",
            Self::E0503 => "E0503",
            Self::W0101 => "W0101",
            Self::W0102 => "W0102",
            Self::I0101 => "I0101",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 | Self::E0103 | Self::E0104 => "lexical error",
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206 => {
                "structural error"
            }
            Self::E0301 | Self::E0302 => "declaration error",
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "expression error",
            Self::E0501 | Self::E0502 | Self::E0503 => "unsupported syntax",
            Self::W0101 | Self::W0102 => "warning",
            Self::I0101 => "note",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0102 => "unterminated string meets end of file",
            Self::E0103 => "embedded document meets end of file",
            Self::E0104 => "unterminated heredoc",
            Self::E0201 => "unexpected token",
            Self::E0202 => "unclosed parenthesis",
            Self::E0203 => "unclosed bracket",
            Self::E0204 => "missing 'end'",
            Self::E0205 => "missing statement separator",
            Self::E0206 => "nesting too deep",
            Self::E0301 => "missing method name",
            Self::E0302 => "invalid parameter",
            Self::E0401 => "expected expression",
            Self::E0402 => "missing operand",
            Self::E0403 => "unclosed argument list",
            Self::E0404 => "missing method name after '.'",
            Self::E0501 => "squiggly heredoc requires Rill 1.1 or later",
            Self::E0502 => "safe navigation requires Rill 1.2 or later",
            Self::E0503 => "endless method definition requires Rill 2.0 or later",
            Self::W0101 => "possibly useless use of a literal in void context",
            Self::W0102 => "statement not reached",
            Self::I0101 => "data after __END__ is not parsed",
        }
    }

    /// Level a diagnostic with this code is reported at
    pub fn default_level(&self) -> Level {
        match self {
            Self::E0206 => Level::Fatal,
            Self::W0101 | Self::W0102 => Level::Warning,
            Self::I0101 => Level::Info,
            _ => Level::Error,
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0201 | Self::E0202 | Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206
        )
    }

    /// Check if this code marks syntax gated by language version
    pub fn is_version_gate(&self) -> bool {
        matches!(self, Self::E0501 | Self::E0502 | Self::E0503)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
