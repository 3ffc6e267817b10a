//! Diagnostic types
//!
//! Provides rich diagnostic information including:
//! - Error codes for categorization
//! - Levels (info, warning, error, fatal)
//! - Hints/suggestions for fixes
//! - Related source locations

use std::fmt;

use rowan::{TextRange, TextSize};

use super::codes::ErrorCode;
use super::context::ParseContext;
use crate::base::{SourceBuffer, Span};

/// Level of a diagnostic
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// An informational note
    Info,
    /// A warning that doesn't invalidate the source
    Warning,
    /// A syntax error
    #[default]
    Error,
    /// An error after which the parser cannot continue
    Fatal,
}

impl Level {
    /// Check if this level makes the source syntactically invalid
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error | Self::Fatal)
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Related location information for a diagnostic
///
/// Used to point to related source locations, e.g.,
/// "`def` opened here" pointing at the start of an unclosed method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl RelatedInfo {
    /// Create a new related info
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A parse-time condition reported by the lexer or the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized code
    pub code: ErrorCode,
    /// Level
    pub level: Level,
    /// Optional suggestion for fixing the problem
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl Diagnostic {
    /// Create a diagnostic at the code's default level
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            level: code.default_level(),
            hint: None,
            related: vec![],
        }
    }

    /// Create a diagnostic with the code's default message
    pub fn from_code(code: ErrorCode, range: TextRange) -> Self {
        Self::new(code.default_message(), range, code)
    }

    /// Create a diagnostic at a specific offset with zero-width range
    pub fn at_offset(message: impl Into<String>, offset: TextSize, code: ErrorCode) -> Self {
        Self::new(message, TextRange::empty(offset), code)
    }

    /// Create a builder for more complex diagnostics
    pub fn builder(code: ErrorCode) -> DiagnosticBuilder {
        DiagnosticBuilder::new(code)
    }

    /// Add a hint to this diagnostic
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information
    pub fn with_related(mut self, info: RelatedInfo) -> Self {
        self.related.push(info);
        self
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }

    pub fn has_related(&self) -> bool {
        !self.related.is_empty()
    }

    /// Line/column span of this diagnostic in `buffer`
    pub fn span(&self, buffer: &SourceBuffer) -> Span {
        buffer.line_index().span(self.range)
    }

    /// Format the diagnostic without source context
    pub fn format(&self) -> String {
        let mut result = format!("{}: {}: {}", self.level, self.code, self.message);
        if let Some(hint) = &self.hint {
            result.push_str(&format!("\n  hint: {}", hint));
        }
        result
    }

    /// Render as `name:line:col: level: message`, followed by the source line
    /// and a caret marker under the range.
    pub fn render(&self, buffer: &SourceBuffer) -> String {
        let span = self.span(buffer);
        let mut out = format!(
            "{}:{}:{}: {}: {}",
            buffer.name(),
            span.start.line,
            span.start.column + 1,
            self.level,
            self.message
        );

        if let Some(line) = buffer.source_line(span.start.line) {
            let start = span.start.column as usize;
            let end = if span.is_single_line() {
                span.end.column as usize
            } else {
                line.len()
            };
            // Columns are bytes; the caret is drawn in characters
            let chars_before = |byte: usize| {
                line.char_indices().take_while(|&(i, _)| i < byte).count()
            };
            let caret_start = chars_before(start);
            let width = chars_before(end).saturating_sub(caret_start).max(1);
            out.push('\n');
            out.push_str(line);
            out.push('\n');
            out.push_str(&" ".repeat(caret_start));
            out.push_str(&"^".repeat(width));
        }

        if let Some(hint) = &self.hint {
            out.push_str(&format!("\n  hint: {}", hint));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

/// Builder for creating complex diagnostics
pub struct DiagnosticBuilder {
    code: ErrorCode,
    message: Option<String>,
    range: Option<TextRange>,
    level: Level,
    hint: Option<String>,
    related: Vec<RelatedInfo>,
}

impl DiagnosticBuilder {
    /// Create a new builder with a code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            range: None,
            level: code.default_level(),
            hint: None,
            related: vec![],
        }
    }

    /// Set the message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the source range
    pub fn range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Set the offset (creates an empty range at that position)
    pub fn at_offset(mut self, offset: TextSize) -> Self {
        self.range = Some(TextRange::empty(offset));
        self
    }

    /// Set the level
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Add a hint
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information
    pub fn related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo::new(message, range));
        self
    }

    /// Build the diagnostic
    ///
    /// A missing message falls back to the code's default; a missing range to offset 0.
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            range: self
                .range
                .unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            code: self.code,
            level: self.level,
            hint: self.hint,
            related: self.related,
        }
    }
}

/// Create a context-aware "unexpected token" diagnostic
pub fn format_context_error(
    found: &str,
    context: ParseContext,
    code: ErrorCode,
    range: TextRange,
) -> Diagnostic {
    let message = format!(
        "unexpected {} {}; expected {}",
        found,
        context.description(),
        context.expected_description()
    );

    Diagnostic::builder(code).message(message).range(range).build()
}
