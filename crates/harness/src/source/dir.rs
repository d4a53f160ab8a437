// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Directory-tree fixture backend.
//!
//! Layout: `<dir>/in/<case>.<inExt>` paired with `<dir>/out/<case>.<outExt>`
//! by matching stems after rewriting the input extension.

use super::{output_twin, IN_FOLDER, OUT_FOLDER};
use crate::fixture::{Fixture, FixtureData};
use std::path::Path;

/// Scan a fixture directory for input/output pairs.
///
/// Returns an empty set unless `dir` contains both an `in` and an `out`
/// subfolder. Input files are visited in sorted name order; a pair is kept
/// only when its output twin exists as a regular file. `filter`, when set,
/// restricts the scan to one exact input file name.
pub fn scan(dir: &Path, filter: Option<&str>) -> Vec<Fixture> {
    let in_dir = dir.join(IN_FOLDER);
    let out_dir = dir.join(OUT_FOLDER);
    if !in_dir.is_dir() || !out_dir.is_dir() {
        return Vec::new();
    }

    let entries = match std::fs::read_dir(&in_dir) {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(?in_dir, %error, "failed to list input folder");
            return Vec::new();
        }
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    let mut fixtures = Vec::new();
    for name in names {
        if let Some(case) = filter {
            if name != case {
                continue;
            }
        }
        let out_path = out_dir.join(output_twin(&name));
        if !out_path.is_file() {
            continue;
        }
        let in_path = in_dir.join(&name);
        fixtures.push(Fixture::new(
            name,
            FixtureData::File(in_path),
            FixtureData::File(out_path),
        ));
    }
    fixtures
}

#[cfg(test)]
#[path = "dir_tests.rs"]
mod tests;
