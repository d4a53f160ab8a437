// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration: backend toggles and fixture root paths.

use crate::env;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading a config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolved harness configuration.
///
/// Both fields degrade gracefully: with `use_external` off or
/// `external_root` absent, resolution skips the directory backend and falls
/// through to the archive backends.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Whether the external directory backend participates in resolution
    /// (default: false)
    #[serde(default)]
    pub use_external: bool,

    /// Root folder holding external fixture trees and archives
    /// (default: empty)
    #[serde(default)]
    pub external_root: PathBuf,
}

impl HarnessConfig {
    /// Load a config from a TOML or JSON file, chosen by file extension.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };
        Ok(config)
    }

    /// Resolve configuration from the environment.
    ///
    /// # Priority
    ///
    /// 1. Config file named by `CASEPACK_CONFIG`, when present and readable
    /// 2. `CASEPACK_USE_EXTERNAL` / `CASEPACK_EXTERNAL_ROOT` field overrides
    /// 3. Defaults (no directory backend, empty root)
    ///
    /// An unreadable or unparseable config file is logged and treated as
    /// absent; resolution then falls through to the archive backends.
    pub fn resolve() -> Self {
        let mut config = env::config_file()
            .and_then(|path| match Self::load(&path) {
                Ok(config) => Some(config),
                Err(error) => {
                    tracing::warn!(?path, %error, "ignoring unreadable harness config");
                    None
                }
            })
            .unwrap_or_default();
        if let Some(use_external) = env::use_external() {
            config.use_external = use_external;
        }
        if let Some(root) = env::external_root() {
            config.external_root = root;
        }
        config
    }

    /// Config with the directory backend enabled at the given root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            use_external: true,
            external_root: root.into(),
        }
    }

    /// Config with only archive backends, rooted at the given folder.
    pub fn archives_only(root: impl Into<PathBuf>) -> Self {
        Self {
            use_external: false,
            external_root: root.into(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
