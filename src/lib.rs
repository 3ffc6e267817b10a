//! # rill-base
//!
//! Processed source model for the Rill scripting language: a parsed buffer
//! with indexed access to its lines, tokens, comments, and diagnostics.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! project   → File discovery, parallel processing of many files
//!   ↓
//! source    → ProcessedSource: line table, token index, comment index
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, engines, diagnostics
//!   ↓
//! base      → Primitives (SourceBuffer, LineIndex, TextRange)
//! ```
//!
//! ## Example
//!
//! ```
//! use rill::{LanguageVersion, ParserEngine, ProcessedSource};
//!
//! let source = ProcessedSource::new(
//!     "greeting = \"hi\" # say hi\n",
//!     LanguageVersion::V2_1,
//!     None,
//!     ParserEngine::Classic,
//! )
//! .unwrap();
//!
//! assert!(source.valid_syntax());
//! assert_eq!(source.line_at(0), Some("greeting = \"hi\" # say hi"));
//! assert!(source.line_with_comment(1));
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → source → project)
// ============================================================================

/// Foundation types: SourceBuffer, LineIndex, TextRange
pub mod base;

/// Error types returned by construction
pub mod error;

/// Parser: Logos lexer, recursive-descent parser, engines, diagnostics
pub mod parser;

/// Processed sources and their indices
pub mod source;

/// Project management: file discovery and batch processing
pub mod project;

// Re-export the main entry points
pub use error::{ConfigurationError, SourceError};
pub use parser::{Diagnostic, ErrorCode, LanguageVersion, Level, ParserEngine};
pub use source::{Comment, ParseOptions, ParseState, ProcessedSource, Ranged, Token};

// Re-export foundation types
pub use base::{LineCol, LineIndex, Position, SourceBuffer, Span, TextRange, TextSize};
