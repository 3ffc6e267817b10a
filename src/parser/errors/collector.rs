//! Diagnostic collection for a single parse pass.
//!
//! A [`DiagnosticsEngine`] is the sink a parser strategy reports into. Its
//! consumer appends into a [`Diagnostics`] collector owned by the parse
//! invocation; the engine decides which diagnostics abort tokenization.

use thiserror::Error;

use super::error::{Diagnostic, Level};

/// Append-only, ordered list of diagnostics from one parse pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diagnostic. Nothing is dropped or deduplicated.
    pub fn record(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any diagnostic has level `Error` or `Fatal`
    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|d| d.level.is_error())
    }

    /// Valid iff the parser did not fail internally and nothing reached `Error`.
    pub fn valid_syntax(&self, parser_failed: bool) -> bool {
        !parser_failed && !self.has_errors()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Tokenization was aborted by a diagnostic.
///
/// The diagnostic has already been handed to the consumer when this is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{diagnostic}")]
pub struct SyntaxError {
    pub diagnostic: Diagnostic,
}

impl SyntaxError {
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self { diagnostic }
    }
}

/// Sink handed to a parser strategy for one tokenize call.
pub struct DiagnosticsEngine<'a> {
    consumer: Box<dyn FnMut(Diagnostic) + 'a>,
    all_errors_are_fatal: bool,
    ignore_warnings: bool,
}

impl<'a> DiagnosticsEngine<'a> {
    pub fn new(consumer: impl FnMut(Diagnostic) + 'a) -> Self {
        Self {
            consumer: Box::new(consumer),
            all_errors_are_fatal: false,
            ignore_warnings: false,
        }
    }

    /// An engine whose consumer appends into `diagnostics`.
    pub fn collecting_into(diagnostics: &'a mut Diagnostics) -> Self {
        Self::new(move |d| diagnostics.record(d))
    }

    pub fn all_errors_are_fatal(&self) -> bool {
        self.all_errors_are_fatal
    }

    pub fn set_all_errors_are_fatal(&mut self, value: bool) {
        self.all_errors_are_fatal = value;
    }

    pub fn ignore_warnings(&self) -> bool {
        self.ignore_warnings
    }

    pub fn set_ignore_warnings(&mut self, value: bool) {
        self.ignore_warnings = value;
    }

    /// Hand a diagnostic to the consumer.
    ///
    /// Returns `Err` when the diagnostic must stop tokenization: any `Fatal`
    /// diagnostic, or an `Error` while `all_errors_are_fatal` is set.
    pub fn process(&mut self, diagnostic: Diagnostic) -> Result<(), SyntaxError> {
        if self.ignore_warnings && diagnostic.level == Level::Warning {
            return Ok(());
        }

        let aborts = diagnostic.level == Level::Fatal
            || (self.all_errors_are_fatal && diagnostic.level == Level::Error);
        if aborts {
            (self.consumer)(diagnostic.clone());
            Err(SyntaxError::new(diagnostic))
        } else {
            (self.consumer)(diagnostic);
            Ok(())
        }
    }
}

impl std::fmt::Debug for DiagnosticsEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsEngine")
            .field("all_errors_are_fatal", &self.all_errors_are_fatal)
            .field("ignore_warnings", &self.ignore_warnings)
            .finish_non_exhaustive()
    }
}
