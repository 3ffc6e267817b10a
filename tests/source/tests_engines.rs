//! Engine and language version selection.

use rstest::rstest;

use rill::source::ParseOptions;
use rill::{ErrorCode, LanguageVersion, Level, ParseState, ParserEngine, ProcessedSource};

use crate::helpers::source_fixtures::*;
use crate::helpers::source_helpers::*;

#[rstest]
#[case("1.0", "classic", true)]
#[case("1.2", "classic", true)]
#[case("2.1", "classic", true)]
#[case("1.2", "recovering", false)]
#[case("2.0", "recovering", true)]
#[case("2.1", "recovering", true)]
fn test_supported_pairs(#[case] version: &str, #[case] engine: &str, #[case] supported: bool) {
    let result = ProcessedSource::from_tags(ASSIGNMENTS, version, None, engine);
    assert_eq!(result.is_ok(), supported, "{} with {}", version, engine);
}

#[test]
fn test_with_options() {
    let options = ParseOptions::default()
        .with_version(LanguageVersion::V2_0)
        .with_engine(ParserEngine::Recovering);
    let source = ProcessedSource::with_options(ASSIGNMENTS, None, &options).unwrap();
    assert_eq!(source.language_version(), LanguageVersion::V2_0);
    assert_eq!(source.parser_engine(), ParserEngine::Recovering);
    assert_valid(&source);
}

#[rstest]
#[case(LanguageVersion::V1_0, "x = <<~EOS\n  hi\nEOS\n", ErrorCode::E0501)]
#[case(LanguageVersion::V1_1, "a&.b\n", ErrorCode::E0502)]
#[case(LanguageVersion::V1_2, "def one = 1\n", ErrorCode::E0503)]
fn test_syntax_gated_by_version(
    #[case] version: LanguageVersion,
    #[case] input: &str,
    #[case] expected: ErrorCode,
) {
    let old = classic_at(input, version);
    assert!(!old.valid_syntax());
    assert_eq!(diagnostic_codes(&old), vec![expected]);

    let latest = classic(input);
    assert_valid(&latest);
}

#[test]
fn test_classic_stops_at_first_error() {
    let source = classic("x = )\ny = )\n");
    assert_eq!(source.state(), ParseState::TokenizeFailed);
    let errors = source
        .diagnostics()
        .iter()
        .filter(|d| d.level.is_error())
        .count();
    assert_eq!(errors, 1);
}

#[test]
fn test_recovering_reports_every_error() {
    let source = recovering("x = )\ny = )\n");
    assert_eq!(source.state(), ParseState::Completed);
    let errors = source
        .diagnostics()
        .iter()
        .filter(|d| d.level.is_error())
        .count();
    assert!(errors >= 2, "{:?}", diagnostic_codes(&source));
}

#[test]
fn test_diagnostics_are_in_source_order() {
    let source = recovering("x = )\ny = )\n");
    let starts: Vec<_> = source.diagnostics().iter().map(|d| d.range.start()).collect();
    assert!(starts.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_missing_end_points_at_opener() {
    let source = recovering(MISSING_END);
    let diagnostic = source
        .diagnostics()
        .iter()
        .find(|d| d.code == ErrorCode::E0204)
        .expect("missing end");
    assert!(diagnostic.has_related());
    assert_eq!(u32::from(diagnostic.related[0].range.start()), 0);
}

#[test]
fn test_warnings_do_not_invalidate_syntax() {
    let source = classic("42\nx = 1\n");
    assert_eq!(diagnostic_codes(&source), vec![ErrorCode::W0101]);
    assert_eq!(source.diagnostics()[0].level, Level::Warning);
    assert!(source.valid_syntax());
}

#[test]
fn test_end_marker_reports_info() {
    let source = classic(END_MARKER);
    assert_eq!(diagnostic_codes(&source), vec![ErrorCode::I0101]);
    assert!(source.valid_syntax());
}

#[test]
fn test_deep_nesting_is_fatal_for_both_engines() {
    let input = format!("x = {}1{}\n", "(".repeat(200), ")".repeat(200));
    for engine in ParserEngine::ALL {
        let source = ProcessedSource::new(&input, LanguageVersion::V2_1, None, engine).unwrap();
        assert_eq!(source.state(), ParseState::TokenizeFailed, "{}", engine);
        assert!(
            source
                .diagnostics()
                .iter()
                .any(|d| d.code == ErrorCode::E0206 && d.level == Level::Fatal)
        );
    }
}
