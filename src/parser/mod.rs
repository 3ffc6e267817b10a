//! Rowan-based parser for Rill
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! The CST preserves all whitespace and comments; the processed source
//! layer builds its line, token, and comment indexes on top of it.
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens in emission order, diagnostics
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! ParserStrategy → engine policy: stop at the first error or recover
//! ```

#[allow(clippy::module_inception)]
mod parser;

mod engine;
pub mod errors;
mod lexer;
mod syntax_kind;

pub use engine::{Features, LanguageVersion, ParserEngine, ParserStrategy, Tokenized};
pub use errors::{
    Diagnostic, DiagnosticBuilder, Diagnostics, DiagnosticsEngine, ErrorCode, Level,
    ParseContext, RelatedInfo, SyntaxError,
};
pub use lexer::{LexToken, Lexed, Lexer, tokenize};
pub use parser::{Parse, parse, parse_with};
pub use syntax_kind::{RillLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
