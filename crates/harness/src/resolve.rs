// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture resolution: logical path to fixture set via ordered backend
//! fallback.
//!
//! Backends are tried, not merged: the first candidate source yielding at
//! least one fixture wins. A logical path resolving to nothing at all is a
//! normal outcome, not an error; callers that receive zero fixtures
//! generate zero dynamic cases.

use crate::config::HarnessConfig;
use crate::fixture::{Fixture, FixtureData};
use crate::source::archive::ArchiveHandle;
use crate::source::{dir, IN_FOLDER};
use std::path::PathBuf;

/// File extension of the archive backend.
const ARCHIVE_EXTENSION: &str = "zip";

/// Resolves logical paths into fixture sets and keeps every
/// fixture-yielding archive open for the life of the resolution session.
#[derive(Debug)]
pub struct Resolver {
    config: HarnessConfig,
    archives: Vec<ArchiveHandle>,
}

impl Resolver {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            archives: Vec::new(),
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Archives opened by this resolver that produced fixtures. Handles
    /// stay open until [`Resolver::release_archives`] or drop.
    pub fn archives(&self) -> &[ArchiveHandle] {
        &self.archives
    }

    /// Drop this resolver's archive registrations. Containers close once
    /// the last outstanding fixture clone is gone.
    pub(crate) fn release_archives(&mut self) {
        self.archives.clear();
    }

    /// Resolve a logical path into an ordered fixture sequence, possibly
    /// empty.
    pub fn resolve(&mut self, logical: &str) -> Vec<Fixture> {
        self.resolve_filtered(logical, None)
    }

    /// Like [`Resolver::resolve`], restricted to one case name.
    pub fn resolve_case(&mut self, logical: &str, case: &str) -> Vec<Fixture> {
        self.resolve_filtered(logical, Some(case))
    }

    /// Backend fallback in strict order, short-circuiting on the first
    /// non-empty result:
    ///
    /// 1. directory tree under the external root (when enabled),
    /// 2. archive named by the head of the logical path, with the tail as
    ///    the internal prefix,
    /// 3. archive named by the entire logical path, with no prefix.
    fn resolve_filtered(&mut self, logical: &str, filter: Option<&str>) -> Vec<Fixture> {
        if logical.trim().is_empty() {
            return Vec::new();
        }
        let logical = normalize_separators(logical);

        if self.config.use_external && self.config.external_root.is_dir() {
            let fixtures = dir::scan(&self.config.external_root.join(&logical), filter);
            if !fixtures.is_empty() {
                return fixtures;
            }
            tracing::debug!(%logical, "directory backend yielded no fixtures");
        }

        if let Some((container, prefix)) = logical.rsplit_once('/') {
            if !container.is_empty() {
                let fixtures = self.resolve_archive(container, prefix, filter);
                if !fixtures.is_empty() {
                    return fixtures;
                }
            }
        }

        self.resolve_archive(&logical, "", filter)
    }

    /// Search for `<basename of container>.zip` (case-insensitive) inside
    /// `external_root/<dirname of container>` and pair entries under
    /// `prefix` inside each candidate until one yields fixtures.
    fn resolve_archive(
        &mut self,
        container: &str,
        prefix: &str,
        filter: Option<&str>,
    ) -> Vec<Fixture> {
        let (parent, name) = match container.rsplit_once('/') {
            Some((dir, name)) => (self.config.external_root.join(dir), name),
            None => (self.config.external_root.clone(), container),
        };
        let base = if parent.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            parent
        };
        let wanted = format!("{name}.{ARCHIVE_EXTENSION}");

        let entries = match std::fs::read_dir(&base) {
            Ok(entries) => entries,
            Err(error) => {
                tracing::debug!(?base, %error, "cannot list archive folder");
                return Vec::new();
            }
        };
        let mut candidates: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .is_some_and(|n| n.eq_ignore_ascii_case(&wanted))
            })
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        candidates.sort();

        let zip_prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}/")
        };
        for candidate in candidates {
            if std::fs::metadata(&candidate).map_or(0, |m| m.len()) == 0 {
                continue;
            }
            let handle = match ArchiveHandle::open(&candidate) {
                Ok(handle) => handle,
                Err(error) => {
                    // Malformed archives are non-fatal: log and try the
                    // next candidate or backend.
                    tracing::warn!(?candidate, %error, "skipping unreadable archive");
                    continue;
                }
            };
            let pairs = handle.lookup_pairs(&zip_prefix, filter);
            if pairs.is_empty() {
                // Handle drops here, closing a container that yielded
                // nothing.
                continue;
            }
            let in_path = format!("{zip_prefix}{IN_FOLDER}/");
            let fixtures: Vec<Fixture> = pairs
                .into_iter()
                .map(|(input, output)| {
                    let name = input.strip_prefix(&in_path).unwrap_or(&input).to_owned();
                    Fixture::new(
                        name,
                        FixtureData::Entry {
                            archive: handle.clone(),
                            name: input,
                        },
                        FixtureData::Entry {
                            archive: handle.clone(),
                            name: output,
                        },
                    )
                })
                .collect();
            self.archives.push(handle);
            return fixtures;
        }
        Vec::new()
    }
}

/// Map both recognized path separators to `/`.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
