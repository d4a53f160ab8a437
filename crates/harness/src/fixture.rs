// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture data model: one named input/expected-output pair.

use crate::source::archive::{ArchiveError, ArchiveHandle};
use std::path::PathBuf;
use thiserror::Error;

/// Errors reading fixture content from its backend.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file {path:?}: {source}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

/// One named unit of test data, constructed at resolution time from a
/// backend and consumed when its generated case executes.
#[derive(Clone, Debug)]
pub struct Fixture {
    name: String,
    input: FixtureData,
    expected: FixtureData,
}

impl Fixture {
    pub(crate) fn new(name: String, input: FixtureData, expected: FixtureData) -> Self {
        Self {
            name,
            input,
            expected,
        }
    }

    /// Raw backend name, e.g. `case1.in` or `case1`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input(&self) -> &FixtureData {
        &self.input
    }

    pub fn expected(&self) -> &FixtureData {
        &self.expected
    }
}

/// Backend-polymorphic fixture content, read lazily and fully.
#[derive(Clone, Debug)]
pub enum FixtureData {
    /// A file in the directory backend.
    File(PathBuf),

    /// An entry read through a shared archive handle. The handle must stay
    /// open until the generated case has run.
    Entry {
        archive: ArchiveHandle,
        name: String,
    },
}

impl FixtureData {
    /// Materialize the full byte content.
    pub fn read(&self) -> Result<Vec<u8>, FixtureError> {
        match self {
            FixtureData::File(path) => std::fs::read(path).map_err(|source| FixtureError::File {
                path: path.clone(),
                source,
            }),
            FixtureData::Entry { archive, name } => Ok(archive.read_entry(name)?),
        }
    }
}
