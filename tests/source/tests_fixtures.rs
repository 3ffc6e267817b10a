//! Checks over every `.rill` file in `tests/fixtures`.
//!
//! Files named `invalid_*.rill` must produce at least one error; every other
//! fixture must parse without errors under both engines.

use std::path::PathBuf;

use once_cell::sync::Lazy;
use walkdir::WalkDir;

use rill::{LanguageVersion, ParserEngine, ProcessedSource};

static FIXTURES: Lazy<Vec<(PathBuf, Vec<u8>)>> = Lazy::new(|| {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let mut fixtures: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "rill"))
        .map(|e| {
            let bytes = std::fs::read(e.path()).expect("fixture is readable");
            (e.into_path(), bytes)
        })
        .collect();
    fixtures.sort();
    fixtures
});

fn is_invalid_fixture(path: &std::path::Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("invalid_"))
}

fn process(bytes: &[u8], engine: ParserEngine) -> ProcessedSource {
    ProcessedSource::new(bytes, LanguageVersion::LATEST, None, engine).unwrap()
}

#[test]
fn test_fixtures_present() {
    assert!(FIXTURES.len() >= 4, "found {} fixtures", FIXTURES.len());
}

#[test]
fn test_fixtures_validity() {
    for (path, bytes) in FIXTURES.iter() {
        for engine in ParserEngine::ALL {
            let source = process(bytes, engine);
            assert_eq!(
                source.valid_syntax(),
                !is_invalid_fixture(path),
                "{} with {}: {:?}",
                path.display(),
                engine,
                source
                    .diagnostics()
                    .iter()
                    .map(|d| d.format())
                    .collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn test_fixture_tokens_reassemble_source() {
    for (path, bytes) in FIXTURES.iter().filter(|(p, _)| !is_invalid_fixture(p)) {
        let source = process(bytes, ParserEngine::Classic);
        let buffer = source.buffer().expect("fixture decodes");
        // Every gap between sorted tokens is whitespace or the data section
        let mut cursor = 0usize;
        for token in source.sorted_tokens() {
            let start = usize::from(token.begin_offset());
            let gap = &buffer.source()[cursor..start];
            assert!(
                gap.chars().all(char::is_whitespace),
                "{}: unexpected gap {:?}",
                path.display(),
                gap
            );
            cursor = usize::from(token.end_offset());
        }
    }
}

#[test]
fn test_fixture_lines_match_buffer() {
    for (path, bytes) in FIXTURES.iter() {
        let source = process(bytes, ParserEngine::Recovering);
        if let Some(buffer) = source.buffer() {
            let all_lines = buffer.source_lines();
            assert!(source.lines().len() <= all_lines.len(), "{}", path.display());
            for (ours, theirs) in source.lines().iter().zip(all_lines) {
                assert_eq!(ours, theirs);
            }
        }
    }
}

#[test]
fn test_fixture_associations_are_sorted() {
    for (path, bytes) in FIXTURES.iter() {
        let source = process(bytes, ParserEngine::Recovering);
        let starts: Vec<_> = source
            .comment_associations()
            .iter()
            .map(|a| a.range.start())
            .collect();
        assert!(
            starts.windows(2).all(|w| w[0] <= w[1]),
            "{}",
            path.display()
        );
    }
}
