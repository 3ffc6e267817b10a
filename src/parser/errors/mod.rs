//! Parser diagnostics
//!
//! This module provides diagnostics for the Rill lexer and parser:
//! - Categorized error codes for filtering and documentation
//! - Levels from informational notes to fatal errors
//! - Context-aware error messages and recovery sets
//! - The per-parse collector and the sink strategies report into

mod codes;
mod collector;
mod context;
mod error;

pub use codes::ErrorCode;
pub use collector::{Diagnostics, DiagnosticsEngine, SyntaxError};
pub use context::ParseContext;
pub use error::{Diagnostic, DiagnosticBuilder, Level, RelatedInfo, format_context_error};
