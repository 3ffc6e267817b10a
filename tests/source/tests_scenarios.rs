//! End-to-end behaviour of a processed source: the acceptance scenarios.

use rill::{
    Comment, ConfigurationError, LanguageVersion, ParseState, ProcessedSource, TextRange,
    TextSize,
};
use rill::source::{CommentIndex, CommentKind};

use crate::helpers::source_fixtures::*;
use crate::helpers::source_helpers::*;

// ============================================================================
// Data terminator
// ============================================================================

#[test]
fn test_lines_stop_at_end_marker() {
    let source = classic(END_MARKER);
    assert_eq!(source.lines(), ["a = 1"]);
    assert_valid(&source);
}

#[test]
fn test_end_marker_before_last_token_is_kept() {
    // `__END__` here is only a line of a heredoc body
    let source = classic("x = <<EOS\n__END__\nEOS\ny = 1\n");
    assert_eq!(source.line_at(1), Some("__END__"));
    assert_eq!(source.line_at(3), Some("y = 1"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_unknown_engine_tag_fails_construction() {
    let result = ProcessedSource::from_tags("x = 1\n", "2.1", None, "engine_z");
    assert!(matches!(result, Err(ConfigurationError::UnknownEngine(tag)) if tag == "engine_z"));
}

#[test]
fn test_unknown_version_tag_fails_construction() {
    let result = ProcessedSource::from_tags("x = 1\n", "9.9", None, "classic");
    assert!(matches!(result, Err(ConfigurationError::UnknownVersion(_))));
}

#[test]
fn test_unsupported_pair_fails_construction() {
    let result = ProcessedSource::from_tags("x = 1\n", "1.0", None, "recovering");
    let err = result.unwrap_err();
    assert!(matches!(err, ConfigurationError::UnsupportedVersion { .. }));
    assert!(err.to_string().contains("2.0, 2.1"), "{}", err);
}

// ============================================================================
// Syntax errors
// ============================================================================

#[test]
fn test_syntax_error_is_data_not_failure() {
    for source in [classic(UNBALANCED_PAREN), recovering(UNBALANCED_PAREN)] {
        assert!(!source.valid_syntax());
        assert!(!source.diagnostics().is_empty());
        assert!(source.parser_error().is_none());
    }
}

#[test]
fn test_classic_error_leaves_no_tokens() {
    let source = classic(UNBALANCED_PAREN);
    assert_eq!(source.state(), ParseState::TokenizeFailed);
    assert!(source.sorted_tokens().is_empty());
    assert!(source.ast().is_none());
}

#[test]
fn test_recovering_error_keeps_partial_tokens() {
    let source = recovering(UNBALANCED_PAREN);
    assert_eq!(source.state(), ParseState::Completed);
    assert!(!source.sorted_tokens().is_empty());
    assert!(source.ast().is_some());
    assert!(token_texts(&source).contains(&"y"));
}

// ============================================================================
// Duplicate comment lines
// ============================================================================

fn comment_on_line(line: u32, text: &str, start: u32) -> Comment {
    Comment {
        text: text.into(),
        range: TextRange::at(TextSize::new(start), TextSize::of(text)),
        line,
        last_line: line,
        kind: CommentKind::Line,
    }
}

#[test]
fn test_later_comment_on_duplicate_line_wins() {
    let comments = vec![
        comment_on_line(1, "# one", 0),
        comment_on_line(3, "# early", 12),
        comment_on_line(3, "# late", 30),
    ];
    let index = CommentIndex::new(&comments);
    let at_three = index.get(3).map(|i| comments[i].text.as_str());
    assert_eq!(at_three, Some("# late"));
    assert_eq!(index.len(), 2);
}

// ============================================================================
// Empty source
// ============================================================================

#[test]
fn test_empty_source() {
    let source = classic("");
    assert!(source.lines().is_empty());
    assert!(!source.start_with("x"));
    assert!(source.blank());
    assert!(source.valid_syntax());
    assert_eq!(source.state(), ParseState::Completed);
}

#[test]
fn test_blank_when_only_comments() {
    let source = classic("# nothing here\n\n");
    assert!(source.blank());
    assert_eq!(source.comments().len(), 1);
}

#[test]
fn test_defaults_to_latest_release() {
    let source = classic(ASSIGNMENTS);
    assert_eq!(source.language_version(), LanguageVersion::LATEST);
    assert_eq!(source.parser_engine().as_str(), "classic");
}
