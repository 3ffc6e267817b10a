//! Line table queries.

use rstest::rstest;

use crate::helpers::source_fixtures::*;
use crate::helpers::source_helpers::*;

#[test]
fn test_lines_keep_trailing_empty_line() {
    let source = classic(ASSIGNMENTS);
    assert_eq!(source.lines(), ["a = 1", "b = 2", "c = 3", ""]);
}

#[test]
fn test_line_at_is_zero_based() {
    let source = classic(ASSIGNMENTS);
    assert_eq!(source.line_at(0), Some("a = 1"));
    assert_eq!(source.line_at(2), Some("c = 3"));
    assert_eq!(source.line_at(10), None);
}

#[rstest]
#[case(0..2, Some(vec!["a = 1", "b = 2"]))]
#[case(1..1, Some(vec![]))]
#[case(3..9, None)]
fn test_slice(#[case] range: std::ops::Range<usize>, #[case] expected: Option<Vec<&str>>) {
    let source = classic(ASSIGNMENTS);
    let actual = source
        .slice(range)
        .map(|lines| lines.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(actual, expected);
}

#[test]
fn test_slice_open_ranges() {
    let source = classic(ASSIGNMENTS);
    assert_eq!(source.slice(2..).map(|l| l.len()), Some(2));
    assert_eq!(source.slice(..=1).map(|l| l.len()), Some(2));
}

#[rstest]
#[case("a = 1", true)]
#[case("a =", true)]
#[case("b", false)]
#[case("", true)]
fn test_start_with(#[case] prefix: &str, #[case] expected: bool) {
    let source = classic(ASSIGNMENTS);
    assert_eq!(source.start_with(prefix), expected);
}

#[rstest]
#[case(1, Some(0))]
#[case(3, Some(2))]
#[case(4, Some(4))]
#[case(0, None)]
#[case(99, None)]
fn test_line_indentation(#[case] line: usize, #[case] expected: Option<usize>) {
    let source = classic("def f\n  # note\n  x = 1\n    y\nend\n");
    assert_eq!(source.line_indentation(line), expected);
}

#[test]
fn test_neighbouring_lines_of_token() {
    let source = classic(METHOD_WITH_COMMENTS);
    let puts = source
        .tokens()
        .iter()
        .find(|t| t.text == "puts")
        .expect("puts token");
    assert_eq!(puts.line, 5);
    assert_eq!(source.preceding_line(puts), Some("  message = \"hello \" + name"));
    assert_eq!(source.current_line(puts), Some("  puts message # print it"));
    assert_eq!(source.following_line(puts), Some("end"));
}

#[test]
fn test_crlf_lines_are_normalized() {
    let source = classic("a = 1\r\nb = 2\r\n");
    assert_eq!(source.lines(), ["a = 1", "b = 2", ""]);
}

#[test]
fn test_lines_are_memoized() {
    let source = classic(ASSIGNMENTS);
    let first = source.lines().as_ptr();
    let second = source.lines().as_ptr();
    assert_eq!(first, second);
}
