// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end fixture resolution and execution.
//!
//! These tests exercise the full flow (config, resolution across both
//! backends, case compilation, capture, and comparison) against scratch
//! fixture trees and archives.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use casepack::capture::ChannelIo;
use casepack::{CaseReport, Comparison, HarnessConfig, Session};
use std::io::{self, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;

/// Splits comma-joined tokens onto one space-joined line, the program
/// under test for most scenarios here.
fn token_splitter(io: &mut ChannelIo) -> io::Result<()> {
    let mut input = String::new();
    io.read_to_string(&mut input)?;
    let joined = input.trim().split(',').collect::<Vec<_>>().join(" ");
    writeln!(io, "{joined}")
}

fn write_zip(path: &Path, entries: &[(&str, Option<&str>)]) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        match content {
            Some(content) => {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content.as_bytes()).unwrap();
            }
            None => {
                writer.add_directory(*name, options).unwrap();
            }
        }
    }
    writer.finish().unwrap();
}

fn write_case(dir: &Path, stem: &str, input: &str, expected: &str) {
    std::fs::create_dir_all(dir.join("in")).unwrap();
    std::fs::create_dir_all(dir.join("out")).unwrap();
    std::fs::write(dir.join("in").join(format!("{stem}.in")), input).unwrap();
    std::fs::write(dir.join("out").join(format!("{stem}.out")), expected).unwrap();
}

#[test]
fn directory_backend_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let case_dir = root.path().join("ABC051/A");
    write_case(
        &case_dir,
        "case1",
        "happy,newyear,enjoy",
        "happy newyear enjoy",
    );
    write_case(
        &case_dir,
        "case2",
        "haiku,atcoder,tasks",
        "haiku atcoder tasks",
    );

    let mut session = Session::new(HarnessConfig::with_root(root.path()));
    let reports = session.run_all("ABC051/A", &token_splitter).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(CaseReport::passed));
    let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["case1", "case2"]);
}

#[test]
fn archive_backend_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    write_zip(
        &root.path().join("ABC051.zip"),
        &[
            ("A/in/", None),
            ("A/out/", None),
            ("A/in/case1", Some("happy,newyear,enjoy")),
            ("A/out/case1", Some("happy newyear enjoy")),
        ],
    );

    let mut session = Session::new(HarnessConfig::archives_only(root.path()));
    let reports = session.run_all("ABC051/A", &token_splitter).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].name, "case1");
    assert!(reports[0].passed());
}

#[test]
fn directory_wins_over_archive_for_the_same_logical_path() {
    let root = tempfile::tempdir().unwrap();
    write_case(&root.path().join("ABC051/A"), "case1", "a,b", "a b");
    write_zip(
        &root.path().join("ABC051.zip"),
        &[
            ("A/in/", None),
            ("A/out/", None),
            ("A/in/case1", Some("a,b")),
            ("A/out/case1", Some("archive would fail")),
        ],
    );

    let mut session = Session::new(HarnessConfig::with_root(root.path()));
    let reports = session.run_all("ABC051/A", &token_splitter).unwrap();
    assert!(reports[0].passed(), "directory fixture must take priority");
}

#[test]
fn tolerance_cases_from_archive() {
    let root = tempfile::tempdir().unwrap();
    write_zip(
        &root.path().join("GEOM.zip"),
        &[
            ("in/", None),
            ("out/", None),
            ("in/pi", Some("unused")),
            ("out/pi", Some("3.14160")),
        ],
    );
    let print_pi = |io: &mut ChannelIo| -> io::Result<()> { writeln!(io, "3.14159") };

    let mut session = Session::new(HarnessConfig::archives_only(root.path()));
    let cases = session.cases_with("GEOM", Comparison::Approx { tolerance: 0.001 });
    assert_eq!(cases.len(), 1);
    let report = session.run_case(&cases[0], &print_pi).unwrap();
    assert!(report.passed());

    let strict = session.cases_with("GEOM", Comparison::Approx { tolerance: 0.000_000_1 });
    let report = session.run_case(&strict[0], &print_pi).unwrap();
    assert!(!report.passed());
}

#[test]
fn absent_backends_yield_an_empty_session() {
    let root = tempfile::tempdir().unwrap();
    let mut session = Session::new(HarnessConfig::archives_only(root.path()));
    let reports = session.run_all("Nonexistent/Path", &token_splitter).unwrap();
    assert!(reports.is_empty());
}

#[test]
fn config_file_drives_resolution() {
    let root = tempfile::tempdir().unwrap();
    write_case(&root.path().join("ABC051/A"), "case1", "a,b", "a b");
    let config_path = root.path().join("harness.toml");
    std::fs::write(
        &config_path,
        format!(
            "use_external = true\nexternal_root = {:?}\n",
            root.path().to_str().unwrap()
        ),
    )
    .unwrap();

    let config = HarnessConfig::load(&config_path).unwrap();
    let mut session = Session::new(config);
    let reports = session.run_all("ABC051/A", &token_splitter).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].passed());
}

#[test]
fn mixed_case_archive_names_resolve() {
    let root = tempfile::tempdir().unwrap();
    write_zip(
        &root.path().join("abc051.zip"),
        &[
            ("A/in/", None),
            ("A/out/", None),
            ("A/in/case1", Some("a,b")),
            ("A/out/case1", Some("a b")),
        ],
    );

    let mut session = Session::new(HarnessConfig::archives_only(root.path()));
    let reports = session.run_all("ABC051/A", &token_splitter).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].passed());
}
