// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Zip-archive fixture backend.
//!
//! One opened archive serves every case drawn from it: the handle is shared
//! by reference counting and stays open until the last fixture and the
//! owning session have dropped it. Access is serialized through a mutex;
//! the underlying reader is not assumed to tolerate concurrent reads.

use super::{output_twin, IN_FOLDER, OUT_FOLDER};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use zip::ZipArchive;

/// Errors from the archive backend.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The container exists by name but cannot be read.
    #[error("failed to open archive {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("archive {path:?} has no entry {name:?}")]
    MissingEntry { path: PathBuf, name: String },

    #[error("failed to read entry {name:?} from {path:?}: {source}")]
    Read {
        path: PathBuf,
        name: String,
        #[source]
        source: std::io::Error,
    },
}

struct HandleInner {
    path: PathBuf,
    archive: Mutex<ZipArchive<File>>,
}

/// Shared handle over one opened zip container.
///
/// Clones share the same open file; it closes when the last clone drops,
/// at or after session teardown.
pub struct ArchiveHandle {
    inner: Arc<HandleInner>,
}

impl ArchiveHandle {
    /// Open a zip container for reading.
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        let open_err = |source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(|e| open_err(zip::result::ZipError::Io(e)))?;
        let archive = ZipArchive::new(file).map_err(open_err)?;
        Ok(Self {
            inner: Arc::new(HandleInner {
                path: path.to_path_buf(),
                archive: Mutex::new(archive),
            }),
        })
    }

    /// Path the container was opened from.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Pair input entries under `prefix` with their output counterparts.
    ///
    /// Requires `<prefix>in/` and `<prefix>out/` to exist as directory
    /// entries, else returns empty. The counterpart of an input entry is
    /// found by replacing every occurrence of the literal `in` in its full
    /// path with `out`; when no entry exists there, a second stage replaces
    /// only the first occurrence and rewrites a trailing `.in` extension to
    /// `.out`. The two-stage fallback tolerates layouts where `in` occurs
    /// elsewhere in a path component. Pairs with a missing or directory
    /// output are dropped; pairing order is the lexicographic sort of input
    /// entry paths. `filter`, when set, restricts pairing to one exact case
    /// name.
    pub fn lookup_pairs(&self, prefix: &str, filter: Option<&str>) -> Vec<(String, String)> {
        let in_path = format!("{prefix}{IN_FOLDER}/");
        let out_path = format!("{prefix}{OUT_FOLDER}/");

        let names: Vec<String> = {
            let archive = self.inner.archive.lock();
            archive.file_names().map(str::to_owned).collect()
        };
        let present: HashSet<&str> = names.iter().map(String::as_str).collect();
        if !present.contains(in_path.as_str()) || !present.contains(out_path.as_str()) {
            return Vec::new();
        }

        let wanted = filter.map(|case| format!("{in_path}{case}"));
        let mut inputs: Vec<&String> = names
            .iter()
            .filter(|name| name.starts_with(&in_path) && !name.ends_with('/'))
            .filter(|name| wanted.as_deref().map_or(true, |w| name.as_str() == w))
            .collect();
        inputs.sort();

        let mut pairs = Vec::new();
        for input in inputs {
            let primary = input.replace(IN_FOLDER, OUT_FOLDER);
            let output = if present.contains(primary.as_str()) {
                primary
            } else {
                let fallback = output_twin(&replace_first(input, IN_FOLDER, OUT_FOLDER));
                if !present.contains(fallback.as_str()) {
                    continue;
                }
                fallback
            };
            if output.ends_with('/') {
                continue;
            }
            pairs.push((input.clone(), output));
        }
        pairs
    }

    /// Read one entry fully. Lazy: called when the generated case runs,
    /// not at resolution time.
    pub fn read_entry(&self, name: &str) -> Result<Vec<u8>, ArchiveError> {
        let mut archive = self.inner.archive.lock();
        let mut entry = archive.by_name(name).map_err(|source| match source {
            zip::result::ZipError::FileNotFound => ArchiveError::MissingEntry {
                path: self.inner.path.clone(),
                name: name.to_owned(),
            },
            other => ArchiveError::Read {
                path: self.inner.path.clone(),
                name: name.to_owned(),
                source: std::io::Error::other(other),
            },
        })?;
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|source| ArchiveError::Read {
                path: self.inner.path.clone(),
                name: name.to_owned(),
                source,
            })?;
        Ok(bytes)
    }
}

impl Clone for ArchiveHandle {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl std::fmt::Debug for ArchiveHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveHandle")
            .field("path", &self.inner.path)
            .finish_non_exhaustive()
    }
}

/// Replace only the first occurrence of `from` with `to`.
fn replace_first(text: &str, from: &str, to: &str) -> String {
    match text.find(from) {
        Some(at) => {
            let mut replaced = String::with_capacity(text.len() + to.len());
            replaced.push_str(&text[..at]);
            replaced.push_str(to);
            replaced.push_str(&text[at + from.len()..]);
            replaced
        }
        None => text.to_owned(),
    }
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
