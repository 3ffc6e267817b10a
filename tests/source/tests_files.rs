//! Reading sources from disk, singly and in batches.

use std::fs;

use rill::project::{process_directory, process_files};
use rill::source::ParseOptions;
use rill::{LanguageVersion, ParserEngine, ProcessedSource, SourceError};

use crate::helpers::source_fixtures::*;

#[test]
fn test_from_file_matches_in_memory_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("greet.rill");
    fs::write(&path, METHOD_WITH_COMMENTS).unwrap();

    let from_disk =
        ProcessedSource::from_file(&path, LanguageVersion::V2_1, ParserEngine::Classic).unwrap();
    let in_memory = ProcessedSource::new(
        METHOD_WITH_COMMENTS,
        LanguageVersion::V2_1,
        Some(&path),
        ParserEngine::Classic,
    )
    .unwrap();

    assert_eq!(from_disk.path(), Some(path.as_path()));
    assert_eq!(from_disk.file_path(), path.display().to_string());
    assert_eq!(from_disk.tokens(), in_memory.tokens());
    assert_eq!(from_disk.lines(), in_memory.lines());
    assert_eq!(from_disk.checksum(), in_memory.checksum());
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.rill");
    let err = ProcessedSource::from_file(&path, LanguageVersion::V2_1, ParserEngine::Classic)
        .unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }));
    assert!(err.to_string().contains("absent.rill"));
}

#[test]
fn test_from_file_unsupported_pair() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old.rill");
    fs::write(&path, ASSIGNMENTS).unwrap();
    let err = ProcessedSource::from_file(&path, LanguageVersion::V1_0, ParserEngine::Recovering)
        .unwrap_err();
    assert!(matches!(err, SourceError::Configuration(_)));
}

#[test]
fn test_from_file_keeps_invalid_bytes_as_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.rill");
    fs::write(&path, b"\x00\xff\xfe").unwrap();
    let source =
        ProcessedSource::from_file(&path, LanguageVersion::V2_1, ParserEngine::Classic).unwrap();
    assert!(source.parser_error().is_some());
}

#[test]
fn test_process_directory_is_per_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("ok.rill"), ASSIGNMENTS).unwrap();
    fs::write(dir.path().join("broken.rill"), UNBALANCED_PAREN).unwrap();
    fs::write(dir.path().join("readme.md"), "# not rill").unwrap();

    let options = ParseOptions::new(LanguageVersion::V2_1, ParserEngine::Recovering);
    let results = process_directory(dir.path(), &options).unwrap();

    let names: Vec<_> = results
        .keys()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["broken.rill", "ok.rill"]);

    let broken = results[&dir.path().join("broken.rill")].as_ref().unwrap();
    let ok = results[&dir.path().join("ok.rill")].as_ref().unwrap();
    assert!(!broken.valid_syntax());
    assert!(ok.valid_syntax());
}

#[test]
fn test_process_files_empty() {
    let results = process_files(&[], &ParseOptions::default());
    assert!(results.is_empty());
}
