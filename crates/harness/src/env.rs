// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by casepack are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

use std::path::PathBuf;

/// Env var name constants.
pub mod names {
    /// Path to a TOML or JSON harness config file.
    pub const CASEPACK_CONFIG: &str = "CASEPACK_CONFIG";
    /// Whether the external directory backend participates in resolution.
    pub const CASEPACK_USE_EXTERNAL: &str = "CASEPACK_USE_EXTERNAL";
    /// Root folder holding external fixtures and archives.
    pub const CASEPACK_EXTERNAL_ROOT: &str = "CASEPACK_EXTERNAL_ROOT";
}

/// `CASEPACK_CONFIG` — harness config file override.
pub fn config_file() -> Option<PathBuf> {
    std::env::var(names::CASEPACK_CONFIG)
        .ok()
        .map(PathBuf::from)
}

/// `CASEPACK_USE_EXTERNAL` — directory backend toggle.
pub fn use_external() -> Option<bool> {
    std::env::var(names::CASEPACK_USE_EXTERNAL)
        .ok()
        .map(|v| parse_bool(&v))
}

/// `CASEPACK_EXTERNAL_ROOT` — fixture root override.
pub fn external_root() -> Option<PathBuf> {
    std::env::var(names::CASEPACK_EXTERNAL_ROOT)
        .ok()
        .map(PathBuf::from)
}

/// Lenient boolean parsing: only a case-insensitive `true` is true.
pub(crate) fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
