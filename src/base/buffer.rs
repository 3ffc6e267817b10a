//! Source buffers and input encoding normalization.

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::line_index::LineIndex;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Failure to turn raw bytes into buffer text.
///
/// Never returned from construction of a processed source; it is captured as
/// the source's terminal parser error instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferEncodingError {
    /// The bytes are not valid UTF-8.
    #[error("invalid byte sequence in UTF-8 at offset {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    /// A magic comment names an encoding other than UTF-8 or US-ASCII.
    #[error("unsupported source encoding: {0}")]
    UnsupportedEncoding(String),

    /// The source declares US-ASCII but contains a non-ASCII byte.
    #[error("non-ASCII byte at offset {offset} in a US-ASCII source")]
    NonAscii { offset: usize },
}

/// Normalized source text plus its name and line table.
///
/// The coordinate system for every offset in the crate. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceBuffer {
    name: String,
    first_line: u32,
    source: String,
    line_index: LineIndex,
}

impl SourceBuffer {
    /// Build a buffer from raw bytes, normalizing the encoding first.
    pub fn new(name: impl Into<String>, raw: &[u8]) -> Result<Self, BufferEncodingError> {
        let source = normalize(raw)?;
        let line_index = LineIndex::new(&source);
        Ok(Self {
            name: name.into(),
            first_line: 1,
            source,
            line_index,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn first_line(&self) -> u32 {
        self.first_line
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Source lines without line terminators.
    ///
    /// A trailing newline yields a final empty line; an empty source has no lines.
    pub fn source_lines(&self) -> Vec<&str> {
        if self.source.is_empty() {
            return Vec::new();
        }
        self.source.split('\n').collect()
    }

    /// Text of a 1-based line, without its terminator.
    pub fn source_line(&self, line: u32) -> Option<&str> {
        let start = self.line_index.line_start(line)?;
        let rest = &self.source[usize::from(start)..];
        Some(rest.split('\n').next().unwrap_or(rest))
    }

    pub fn slice(&self, range: TextRange) -> Option<&str> {
        self.source.get(usize::from(range.start())..usize::from(range.end()))
    }

    pub fn line_for(&self, offset: TextSize) -> u32 {
        self.line_index.line(offset)
    }

    pub fn column_for(&self, offset: TextSize) -> u32 {
        self.line_index.line_col(offset).col
    }
}

/// Normalize raw bytes to the canonical buffer text.
///
/// Strips a UTF-8 byte order mark, validates UTF-8, honours a magic encoding
/// comment on the first line (second, after a shebang) and folds `\r\n` to `\n`.
pub fn normalize(raw: &[u8]) -> Result<String, BufferEncodingError> {
    let bytes = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let bom_len = raw.len() - bytes.len();
    let text = std::str::from_utf8(bytes).map_err(|e| BufferEncodingError::InvalidUtf8 {
        valid_up_to: bom_len + e.valid_up_to(),
    })?;

    if let Some(encoding) = magic_encoding(text) {
        match encoding.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => {}
            "us-ascii" | "ascii" => {
                if let Some(offset) = text.bytes().position(|b| !b.is_ascii()) {
                    return Err(BufferEncodingError::NonAscii {
                        offset: bom_len + offset,
                    });
                }
            }
            _ => return Err(BufferEncodingError::UnsupportedEncoding(encoding.to_string())),
        }
    }

    Ok(text.replace("\r\n", "\n"))
}

/// Encoding named by a `# encoding: X` / `# -*- coding: X -*-` comment.
fn magic_encoding(text: &str) -> Option<&str> {
    let mut lines = text.lines();
    let first = lines.next()?;
    let candidate = if first.starts_with("#!") {
        lines.next()?
    } else {
        first
    };

    let comment = candidate.trim_start().strip_prefix('#')?;
    let idx = comment.find("coding")?;
    let rest = comment[idx + "coding".len()..].strip_prefix([':', '='])?;
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}
