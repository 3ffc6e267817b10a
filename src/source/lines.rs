//! Logical lines of a processed source.

use std::slice::SliceIndex;

use crate::base::constants::END_MARKER;

/// Source lines without line breaks, cut at a trailing `__END__` section.
///
/// Indexing is zero-based: `get(0)` is the first line. Token line numbers are
/// 1-based, so the line of a token `t` is `get(t.line - 1)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTable {
    lines: Vec<String>,
}

impl LineTable {
    /// Build the table from raw buffer lines.
    ///
    /// The table stops at the first line equal to `__END__` whose zero-based
    /// index is at least `last_token_line` (the 1-based line of the last
    /// emitted token). Without tokens the limit is the line count, so nothing
    /// is cut.
    pub fn build(source_lines: &[&str], last_token_line: Option<u32>) -> Self {
        let limit = last_token_line
            .map(|line| line as usize)
            .unwrap_or(source_lines.len());
        let lines = source_lines
            .iter()
            .enumerate()
            .take_while(|(ix, line)| !(*ix >= limit && **line == END_MARKER))
            .map(|(_, line)| line.to_string())
            .collect();
        Self { lines }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn slice<R>(&self, range: R) -> Option<&[String]>
    where
        R: SliceIndex<[String], Output = [String]>,
    {
        self.lines.get(range)
    }

    /// Leading whitespace characters on a 1-based line
    pub fn indentation(&self, line_number: usize) -> Option<usize> {
        let line = self.get(line_number.checked_sub(1)?)?;
        Some(line.chars().take_while(|c| c.is_whitespace()).count())
    }

    /// Whether the first line starts with `prefix`; false without a first line.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.get(0).is_some_and(|line| line.starts_with(prefix))
    }
}
