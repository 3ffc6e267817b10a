//! Encoding normalization and encoding failures.

use rill::error::BufferEncodingError;
use rill::{LanguageVersion, ParseState, ParserEngine, ProcessedSource};

fn from_bytes(bytes: &[u8]) -> ProcessedSource {
    ProcessedSource::new(bytes, LanguageVersion::LATEST, None, ParserEngine::Classic).unwrap()
}

#[test]
fn test_invalid_utf8_is_captured() {
    let source = from_bytes(b"x = 1\ny = \"\xff\"\n");
    assert_eq!(source.state(), ParseState::BufferFailed);
    assert_eq!(
        source.parser_error(),
        Some(&BufferEncodingError::InvalidUtf8 { valid_up_to: 11 })
    );
    assert!(!source.valid_syntax());
    assert!(source.buffer().is_none());
    assert!(source.tokens().is_empty());
    assert!(source.diagnostics().is_empty());
    assert!(source.lines().is_empty());
    assert!(source.blank());
}

#[test]
fn test_raw_source_survives_encoding_failure() {
    let raw = b"\xfe\xff";
    let source = from_bytes(raw);
    assert_eq!(source.raw_source(), raw);
    assert_eq!(source.checksum().len(), 64);
}

#[test]
fn test_byte_order_mark_is_stripped() {
    let source = from_bytes(b"\xEF\xBB\xBFx = 1\n");
    assert!(source.valid_syntax());
    assert_eq!(source.line_at(0), Some("x = 1"));
    assert_eq!(u32::from(source.tokens()[0].begin_offset()), 0);
}

#[test]
fn test_magic_comment_ascii_rejects_non_ascii() {
    let source = from_bytes("# encoding: us-ascii\nname = \"Zoë\"\n".as_bytes());
    assert!(matches!(
        source.parser_error(),
        Some(BufferEncodingError::NonAscii { .. })
    ));
}

#[test]
fn test_magic_comment_after_shebang() {
    let source = from_bytes(b"#!/usr/bin/env rill\n# -*- coding: latin-9 -*-\nx = 1\n");
    assert_eq!(
        source.parser_error(),
        Some(&BufferEncodingError::UnsupportedEncoding("latin-9".to_string()))
    );
}

#[test]
fn test_magic_comment_utf8_is_accepted() {
    let source = from_bytes("# encoding: utf-8\nname = \"Zoë\"\n".as_bytes());
    assert!(source.valid_syntax());
    assert_eq!(source.comments().len(), 1);
}

#[test]
fn test_checksum_depends_on_raw_bytes() {
    let lf = from_bytes(b"x = 1\n");
    let crlf = from_bytes(b"x = 1\r\n");
    assert_eq!(lf.lines(), crlf.lines());
    assert_ne!(lf.checksum(), crlf.checksum());
}
