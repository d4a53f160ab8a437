// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs::File;
use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;

/// Write a zip at `path` from `(entry, content)` pairs; `None` content
/// marks a directory entry.
pub(crate) fn write_zip(path: &Path, entries: &[(&str, Option<&str>)]) {
    let file = File::create(path).unwrap();
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

/// Write a standard `in/`+`out/` case pair tree under `dir`.
pub(crate) fn write_dir_pair(dir: &Path, name: &str, input: &str, output: &str) {
    let in_dir = dir.join("in");
    let out_dir = dir.join("out");
    std::fs::create_dir_all(&in_dir).unwrap();
    std::fs::create_dir_all(&out_dir).unwrap();
    std::fs::write(in_dir.join(name), input).unwrap();
    let out_name = match name.strip_suffix(".in") {
        Some(stem) => format!("{stem}.out"),
        None => name.to_owned(),
    };
    std::fs::write(out_dir.join(out_name), output).unwrap();
}
