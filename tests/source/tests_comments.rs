//! Comment index and comment association.

use rstest::rstest;

use crate::helpers::source_fixtures::*;
use crate::helpers::source_helpers::*;

#[rstest]
#[case(1, Some("# Greets someone"))]
#[case(2, None)]
#[case(3, Some("# build the message"))]
#[case(5, Some("# print it"))]
fn test_comment_at_line(#[case] line: u32, #[case] expected: Option<&str>) {
    let source = classic(METHOD_WITH_COMMENTS);
    assert_eq!(
        source.comment_at_line(line).map(|c| c.text.as_str()),
        expected
    );
    assert_eq!(source.line_with_comment(line), expected.is_some());
}

#[test]
fn test_each_comment_in_lines_skips_empty_lines() {
    let source = classic(METHOD_WITH_COMMENTS);
    let lines: Vec<_> = source.each_comment_in_lines(2..=6).map(|c| c.line).collect();
    assert_eq!(lines, vec![3, 5]);
}

#[test]
fn test_block_comment_is_indexed_by_first_line() {
    let source = classic(BLOCK_COMMENT);
    let comment = source.comment_at_line(1).expect("block comment");
    assert!(comment.is_block());
    assert_eq!(comment.last_line, 4);
    assert!(!source.line_with_comment(2));
    assert_valid(&source);
}

#[test]
fn test_contains_comment() {
    let source = classic(METHOD_WITH_COMMENTS);
    let method = source.ast().unwrap().children().next().unwrap();
    assert!(source.contains_comment(&method));

    let plain = classic(ASSIGNMENTS);
    let statement = plain.ast().unwrap().children().next().unwrap();
    assert!(!plain.contains_comment(&statement));
}

#[test]
fn test_comments_before_line() {
    let source = classic(METHOD_WITH_COMMENTS);
    let texts: Vec<_> = source
        .comments_before_line(4)
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(texts, vec!["# Greets someone", "# build the message"]);
}

#[test]
fn test_comment_associations() {
    let source = classic(METHOD_WITH_COMMENTS);
    let associations = source.comment_associations();
    assert_eq!(associations.len(), 3);

    let method = &associations[0];
    assert_eq!(method.leading.len(), 1);
    assert_eq!(method.leading[0].text, "# Greets someone");
    assert!(method.trailing.is_none());

    let assignment = &associations[1];
    assert_eq!(assignment.leading[0].text, "# build the message");

    let call = &associations[2];
    assert!(call.leading.is_empty());
    assert_eq!(
        call.trailing.as_ref().map(|c| c.text.as_str()),
        Some("# print it")
    );
}

#[test]
fn test_comments_for_node() {
    let source = classic(METHOD_WITH_COMMENTS);
    let method = source.ast().unwrap().children().next().unwrap();
    let association = source.comments_for(&method).expect("method association");
    assert_eq!(association.leading.len(), 1);
    assert!(source.comments_for(0u32..1).is_none());
}

#[test]
fn test_comment_after_end_marker_is_ignored() {
    let source = classic("x = 1\n__END__\n# not a comment\n");
    assert!(source.comments().is_empty());
    assert!(!source.line_with_comment(3));
}

#[test]
fn test_no_comments_without_buffer() {
    let source = classic_bytes(b"# note\n\xff");
    assert!(source.comments().is_empty());
    assert!(source.comment_associations().is_empty());
    assert!(!source.contains_comment(0u32..1));
}

fn classic_bytes(bytes: &[u8]) -> rill::ProcessedSource {
    rill::ProcessedSource::new(
        bytes,
        rill::LanguageVersion::LATEST,
        None,
        rill::ParserEngine::Classic,
    )
    .unwrap()
}
