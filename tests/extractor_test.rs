use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;
use std::process::Command;

use review_harvest::error::FATAL_EXIT;
use review_harvest::ArchiveExtractor;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// 条目：(名称, 内容)，内容为 None 表示目录
fn build_zip(entries: &[(&str, Option<&[u8]>)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
        match content {
            Some(bytes) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(bytes).unwrap();
            }
            None => writer.add_directory(*name, options).unwrap(),
        }
    }
    writer.finish().unwrap().into_inner()
}

fn count_files(dir: &Path) -> usize {
    let mut count = 0;
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            count += count_files(&path);
        } else {
            count += 1;
        }
    }
    count
}

#[test]
fn test_extracts_nested_files_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("data.zip");
    let binary: &[u8] = &[0, 159, 146, 150, 255, 10, 13];
    fs::write(
        &archive,
        build_zip(&[
            ("readme.txt", Some(b"hello".as_slice())),
            ("docs/guide/intro.md", Some(b"# intro".as_slice())),
            ("bin/blob.dat", Some(binary)),
        ]),
    )
    .unwrap();
    let dest = dir.path().join("out").join("deep");

    let report = ArchiveExtractor::new(&archive, &dest).extract().unwrap();

    assert_eq!(report.files_written, 3);
    assert!(report.failures.is_empty());
    assert_eq!(fs::read(dest.join("readme.txt")).unwrap(), b"hello");
    assert_eq!(fs::read(dest.join("docs/guide/intro.md")).unwrap(), b"# intro");
    assert_eq!(fs::read(dest.join("bin/blob.dat")).unwrap(), binary);
}

#[test]
fn test_directory_entries_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("dirs.zip");
    fs::write(
        &archive,
        build_zip(&[
            ("empty/", None),
            ("photos/", None),
            ("photos/cat.jpg", Some(b"meow".as_slice())),
        ]),
    )
    .unwrap();
    let dest = dir.path().join("out");

    let report = ArchiveExtractor::new(&archive, &dest).extract().unwrap();

    assert_eq!(report.files_written, 1);
    assert_eq!(report.directories_skipped, 2);
    assert!(!dest.join("empty").exists());
    assert_eq!(count_files(&dest), 1);
    assert!(dest.join("photos/cat.jpg").is_file());
}

#[test]
fn test_corrupted_entry_does_not_stop_others() {
    let dir = tempfile::tempdir().unwrap();
    let archive = dir.path().join("mixed.zip");
    let mut bytes = build_zip(&[
        ("one.txt", Some(b"first payload".as_slice())),
        ("two.txt", Some(b"second payload".as_slice())),
        ("three.txt", Some(b"CORRUPTED-PAYLOAD-XYZ".as_slice())),
        ("four.txt", Some(b"fourth payload".as_slice())),
        ("five.txt", Some(b"fifth payload".as_slice())),
    ]);

    // 改动第三个条目的数据，使其 CRC 校验失败
    let marker = b"CORRUPTED-PAYLOAD-XYZ";
    let pos = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .unwrap();
    bytes[pos] ^= 0xFF;
    fs::write(&archive, bytes).unwrap();
    let dest = dir.path().join("out");

    let report = ArchiveExtractor::new(&archive, &dest).extract().unwrap();

    assert_eq!(report.files_written, 4);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "three.txt");
    assert!(!dest.join("three.txt").exists());
    assert_eq!(count_files(&dest), 4);
    assert_eq!(fs::read(dest.join("five.txt")).unwrap(), b"fifth payload");
}

#[test]
fn test_non_archive_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let fake = dir.path().join("notes.zip");
    fs::write(&fake, "this is just a text file, not an archive").unwrap();
    let dest = dir.path().join("out");

    let err = ArchiveExtractor::new(&fake, &dest).extract().unwrap_err();

    assert!(err.is_invalid_archive());
    assert_eq!(count_files(&dest), 0);
}

#[test]
fn test_missing_archive_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ArchiveExtractor::new(dir.path().join("nope.zip"), dir.path().join("out"))
        .extract()
        .unwrap_err();

    assert!(!err.is_invalid_archive());
}

#[test]
fn test_cli_exit_codes() {
    let exe = env!("CARGO_BIN_EXE_extract_archive");
    let dir = tempfile::tempdir().unwrap();

    let usage = Command::new(exe).output().unwrap();
    assert_eq!(usage.status.code(), Some(i32::from(FATAL_EXIT)));

    let help = Command::new(exe).arg("--help").output().unwrap();
    assert_eq!(help.status.code(), Some(0));

    let missing = Command::new(exe)
        .arg(dir.path().join("missing.zip"))
        .arg(dir.path().join("unused"))
        .output()
        .unwrap();
    assert_eq!(missing.status.code(), Some(i32::from(FATAL_EXIT)));

    let fake = dir.path().join("fake.zip");
    fs::write(&fake, "plain text").unwrap();
    let dest = dir.path().join("out");
    let invalid = Command::new(exe).arg(&fake).arg(&dest).output().unwrap();
    assert_eq!(invalid.status.code(), Some(i32::from(FATAL_EXIT)));
    assert_eq!(count_files(&dest), 0);

    let archive = dir.path().join("ok.zip");
    fs::write(&archive, build_zip(&[("a/b.txt", Some(b"b".as_slice()))])).unwrap();
    let ok = Command::new(exe).arg(&archive).arg(&dest).output().unwrap();
    assert_eq!(ok.status.code(), Some(0));
    assert_eq!(fs::read(dest.join("a/b.txt")).unwrap(), b"b");
}
