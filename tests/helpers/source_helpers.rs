//! Construction and inspection helpers for processed sources.

use rill::{ErrorCode, LanguageVersion, ParserEngine, ProcessedSource};

/// Parse `source` as the latest release with the classic engine.
pub fn classic(source: &str) -> ProcessedSource {
    ProcessedSource::new(source, LanguageVersion::LATEST, None, ParserEngine::Classic)
        .expect("classic supports the latest release")
}

/// Parse `source` as the latest release with the recovering engine.
pub fn recovering(source: &str) -> ProcessedSource {
    ProcessedSource::new(source, LanguageVersion::LATEST, None, ParserEngine::Recovering)
        .expect("recovering supports the latest release")
}

/// Parse `source` as `version` with the classic engine.
pub fn classic_at(source: &str, version: LanguageVersion) -> ProcessedSource {
    ProcessedSource::new(source, version, None, ParserEngine::Classic)
        .expect("classic supports every release")
}

/// Texts of the tokens in emission order.
pub fn token_texts(source: &ProcessedSource) -> Vec<&str> {
    source.tokens().iter().map(|t| t.text.as_str()).collect()
}

/// Texts of the tokens in offset order.
pub fn sorted_texts(source: &ProcessedSource) -> Vec<&str> {
    source
        .sorted_tokens()
        .iter()
        .map(|t| t.text.as_str())
        .collect()
}

pub fn diagnostic_codes(source: &ProcessedSource) -> Vec<ErrorCode> {
    source.diagnostics().iter().map(|d| d.code).collect()
}

/// Assert a source parsed cleanly, listing any diagnostics on failure.
pub fn assert_valid(source: &ProcessedSource) {
    assert!(
        source.valid_syntax(),
        "Expected valid syntax, got {} diagnostic(s):\n{}",
        source.diagnostics().len(),
        source
            .diagnostics()
            .iter()
            .map(|d| format!("  {}", d.format()))
            .collect::<Vec<_>>()
            .join("\n")
    );
}
