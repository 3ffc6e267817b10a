//! Foundation types for the Rill toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`LineCol`], [`LineIndex`] - Offset to line/column conversion
//! - [`Position`], [`Span`] - Line/column positions for diagnostics
//! - [`SourceBuffer`] - Normalized source text with its name
//! - Domain constants (file extension, end marker)
//!
//! This module has NO dependencies on other rill modules.

pub mod constants;
mod buffer;
mod line_index;
mod position;

pub use buffer::{BufferEncodingError, SourceBuffer};
pub use line_index::{LineCol, LineIndex};
pub use position::{Position, Span};

// Re-export text-size types for convenience
pub use text_size;
pub use text_size::{TextRange, TextSize};
