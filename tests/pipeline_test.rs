//! Integration tests for the archive pipeline

#[path = "common/mod.rs"]
mod common;

use aen_scrub::config::ResolvedConfig;
use aen_scrub::errors::AppError;
use aen_scrub::pipeline::process_archive;
use common::*;
use tempfile::TempDir;

fn config_with_scratch(dir: &std::path::Path) -> ResolvedConfig {
    ResolvedConfig {
        scratch_dir: Some(dir.to_path_buf()),
        ..ResolvedConfig::default()
    }
}

#[test]
fn test_cleans_xml_and_passes_other_entries_through() {
    let temp_dir = TempDir::new().unwrap();
    let scratch_parent = temp_dir.path().join("scratch");
    std::fs::create_dir_all(&scratch_parent).unwrap();

    let source = temp_dir.path().join("sample.aen");
    create_test_archive(
        &source,
        &[
            ("doc.xml", &b"A\x00B\x1fC"[..]),
            ("readme.txt", &b"A\x00B"[..]),
        ],
    )
    .unwrap();

    let output = temp_dir.path().join("sample_cleaned.aen");
    let mut report = Vec::new();
    let summary = process_archive(
        &source,
        &output,
        &config_with_scratch(&scratch_parent),
        &mut report,
    )
    .unwrap();

    let entries = read_archive(&output);
    assert_eq!(
        entries,
        vec![
            ("doc.xml".to_string(), b"ABC".to_vec()),
            ("readme.txt".to_string(), b"A\x00B".to_vec()),
        ]
    );

    assert_eq!(summary.tally.get('\u{0}'), 1);
    assert_eq!(summary.tally.get('\u{1f}'), 1);
    assert_eq!(summary.tally.total(), 2);
    assert_eq!(summary.xml_scanned, 1);
    assert_eq!(summary.xml_modified, 1);
    assert_eq!(summary.entries_written, 2);

    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("Character: U+0000 | Count: 1"));
    assert!(report.contains("Character: U+001F | Count: 1"));
    assert!(report.contains("Total number of problematic characters found: 2"));

    assert_eq!(scratch_dirs_in(&scratch_parent), 0);
    assert!(source.exists());
}

#[test]
fn test_archive_without_xml_round_trips() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("plain.aen");
    let files: &[(&str, &[u8])] = &[
        ("assets/", &b""[..]),
        ("assets/logo.png", &[0x89u8, 0x50, 0x4e, 0x47, 0x00, 0x1f][..]),
        ("notes.txt", &b"tab\there\x0b"[..]),
        ("data.XML", &b"upper\x01case"[..]),
    ];
    create_test_archive(&source, files).unwrap();

    let output = temp_dir.path().join("plain_cleaned.aen");
    let mut report = Vec::new();
    let summary = process_archive(
        &source,
        &output,
        &config_with_scratch(temp_dir.path()),
        &mut report,
    )
    .unwrap();

    assert_eq!(read_archive(&output), read_archive(&source));
    assert!(summary.tally.is_empty());
    assert_eq!(summary.xml_scanned, 0);

    let report = String::from_utf8(report).unwrap();
    assert!(report.contains("Total number of problematic characters found: 0"));
}

#[test]
fn test_nested_xml_entries_are_cleaned() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("nested.aen");
    create_test_archive(
        &source,
        &[
            ("word/", &b""[..]),
            ("word/document.xml", DIRTY_DOCUMENT_XML.as_bytes()),
            ("word/styles.xml", &b"<styles/>"[..]),
        ],
    )
    .unwrap();

    let output = temp_dir.path().join("nested_cleaned.aen");
    let summary = process_archive(
        &source,
        &output,
        &config_with_scratch(temp_dir.path()),
        &mut Vec::new(),
    )
    .unwrap();

    let entries = read_archive(&output);
    let names: Vec<&str> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["word/", "word/document.xml", "word/styles.xml"]);
    assert_eq!(entries[1].1, CLEAN_DOCUMENT_XML.as_bytes());
    assert_eq!(entries[2].1, b"<styles/>");

    let order: Vec<(char, usize)> = summary.tally.iter().collect();
    assert_eq!(order, vec![('\u{b}', 1), ('\u{7}', 2)]);
    assert_eq!(summary.xml_scanned, 2);
    assert_eq!(summary.xml_modified, 1);
}

#[test]
fn test_non_utf8_xml_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("latin1.aen");
    create_test_archive(&source, &[("doc.xml", &[0x3cu8, 0x61, 0xe9, 0x3e][..])]).unwrap();

    let output = temp_dir.path().join("latin1_cleaned.aen");
    let err = process_archive(
        &source,
        &output,
        &config_with_scratch(temp_dir.path()),
        &mut Vec::new(),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::Encoding { .. }));
    assert!(!output.exists());
    assert_eq!(scratch_dirs_in(temp_dir.path()), 0);
}

#[test]
fn test_corrupt_archive_fails_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("corrupt.aen");
    std::fs::write(&source, b"PK\x03\x04 truncated").unwrap();

    let output = temp_dir.path().join("corrupt_cleaned.aen");
    let err = process_archive(
        &source,
        &output,
        &config_with_scratch(temp_dir.path()),
        &mut Vec::new(),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::ArchiveRead(_)));
    assert!(!output.exists());
    assert_eq!(scratch_dirs_in(temp_dir.path()), 0);
}

#[test]
fn test_case_insensitive_extension_from_config() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("upper.aen");
    create_test_archive(&source, &[("DATA.XML", &b"x\x02y"[..])]).unwrap();

    let config = ResolvedConfig {
        xml_case_insensitive: true,
        ..config_with_scratch(temp_dir.path())
    };
    let output = temp_dir.path().join("upper_cleaned.aen");
    let summary = process_archive(&source, &output, &config, &mut Vec::new()).unwrap();

    assert_eq!(summary.tally.total(), 1);
    assert_eq!(read_archive(&output)[0].1, b"xy");
}

#[test]
fn test_aliasing_entry_names_fail_without_output() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("alias.aen");
    create_test_archive(
        &source,
        &[("a.txt", &b"one"[..]), ("x/../a.txt", &b"two"[..])],
    )
    .unwrap();

    let output = temp_dir.path().join("alias_cleaned.aen");
    let err = process_archive(
        &source,
        &output,
        &config_with_scratch(temp_dir.path()),
        &mut Vec::new(),
    )
    .unwrap_err();

    assert!(matches!(err, AppError::ArchiveRead(_)));
    assert!(!output.exists());
    assert_eq!(scratch_dirs_in(temp_dir.path()), 0);
}
