//! Token stream, sorted index, and range queries.

use rill::parser::SyntaxKind;
use rill::{TextRange, TextSize};
use rstest::rstest;

use crate::helpers::source_fixtures::*;
use crate::helpers::source_helpers::*;

fn range(start: u32, end: u32) -> TextRange {
    TextRange::new(TextSize::new(start), TextSize::new(end))
}

#[test]
fn test_emission_order_puts_heredoc_body_first() {
    let source = classic(HEREDOC_CALL);
    assert_eq!(
        token_texts(&source),
        vec!["x", "=", "<<~EOS", "  body\n", "EOS", ".", "strip", "\n", "y", "=", "2", "\n"]
    );
}

#[test]
fn test_sorted_tokens_follow_offsets() {
    let source = classic(HEREDOC_CALL);
    assert_eq!(
        sorted_texts(&source),
        vec!["x", "=", "<<~EOS", ".", "strip", "\n", "  body\n", "EOS", "y", "=", "2", "\n"]
    );
    let offsets: Vec<_> = source.sorted_tokens().iter().map(|t| t.begin_offset()).collect();
    assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_sorted_tokens_are_stable_and_complete() {
    let source = classic(HEREDOC_CALL);
    assert_eq!(source.sorted_tokens().len(), source.tokens().len());
    for token in source.tokens() {
        assert!(source.sorted_tokens().contains(token));
    }
}

#[test]
fn test_tokens_within_heredoc_statement() {
    let source = classic(HEREDOC_CALL);
    let statement = source.ast().unwrap().children().next().unwrap();
    let texts: Vec<_> = source
        .tokens_within(&statement)
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["x", "=", "<<~EOS", ".", "strip"]);
}

#[test]
fn test_first_and_last_token_index() {
    let source = classic(ASSIGNMENTS);
    // "b = 2" spans offsets 6..11
    assert_eq!(source.first_token_index(range(6, 11)), Some(4));
    assert_eq!(source.last_token_index(range(6, 11)), Some(6));
    assert_eq!(source.first_token_of(range(6, 11)).map(|t| t.text.as_str()), Some("b"));
    assert_eq!(source.last_token_of(range(6, 11)).map(|t| t.text.as_str()), Some("2"));
}

#[test]
fn test_tokens_within_empty_cases() {
    let source = classic(ASSIGNMENTS);
    // Past the end of the stream
    assert!(source.tokens_within(range(100, 120)).is_empty());
    // Inside whitespace between tokens
    assert!(source.tokens_within(range(1, 2)).is_empty());
    assert_eq!(source.first_token_index(range(100, 120)), None);
}

#[test]
fn test_tokens_within_open_ended_range() {
    let source = classic(ASSIGNMENTS);
    // Ends beyond the last token, so the slice runs to the end
    let texts: Vec<_> = source
        .tokens_within(range(12, 500))
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["c", "=", "3", "\n"]);
}

#[test]
fn test_tokens_within_accepts_std_ranges() {
    let source = classic(ASSIGNMENTS);
    assert_eq!(source.tokens_within(0u32..5).len(), 3);
}

#[test]
fn test_token_positions() {
    let source = classic(METHOD_WITH_COMMENTS);
    let name = source
        .tokens()
        .iter()
        .find(|t| t.text == "message")
        .unwrap();
    assert_eq!((name.line, name.column), (4, 2));
    assert_eq!(name.kind, SyntaxKind::IDENT);
}

#[test]
fn test_token_kinds() {
    let source = classic(METHOD_WITH_COMMENTS);
    let def = &source.sorted_tokens()[2];
    assert!(def.is_keyword());
    assert!(source.tokens().iter().any(|t| t.is_comment()));
    assert!(source.tokens().iter().any(|t| t.is_newline()));
}

#[test]
fn test_whitespace_is_not_a_token() {
    let source = classic("a   =   1");
    assert_eq!(token_texts(&source), vec!["a", "=", "1"]);
}

#[rstest]
#[case::line_continuation("x = <<A \\\nfoo\nA\ny = 1\n")]
#[case::multiline_string("x = <<A + \"a\nb\"\nbody\nA\n")]
fn test_heredoc_body_after_line_spanning_token(#[case] text: &str) {
    let source = recovering(text);
    for pair in source.sorted_tokens().windows(2) {
        assert!(
            pair[0].end_offset() <= pair[1].begin_offset(),
            "{:?} overlaps {:?}",
            pair[0],
            pair[1]
        );
    }
    assert_eq!(source.ast().unwrap().text().to_string(), text);
    assert_eq!(
        source
            .tokens()
            .iter()
            .filter(|t| t.kind == SyntaxKind::HEREDOC_BODY)
            .count(),
        1
    );
}

#[test]
fn test_tokens_after_continued_heredoc_line_keep_offsets() {
    let source = recovering("x = <<A \\\nfoo\nA\ny = 1\n");
    let y = source
        .tokens()
        .iter()
        .find(|t| t.text == "y")
        .unwrap();
    assert_eq!(y.begin_offset(), TextSize::new(16));
    assert_eq!(y.line, 4);
    assert_eq!(
        source
            .tokens_within(range(16, 21))
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>(),
        vec!["y", "=", "1"]
    );
}
