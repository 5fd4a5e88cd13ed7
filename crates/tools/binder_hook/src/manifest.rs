// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::binder::BindingMode;
use crate::error::{HookError, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// One `[[binding]]` table
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub source: Option<PathBuf>,
    #[serde(default)]
    pub mode: Option<BindingMode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "binding")]
    pub bindings: Vec<ManifestEntry>,
}

/// A type to generate bindings for, after merging cli and manifest input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub type_name: String,
    /// explicit source file, already resolved against the project root
    pub source: Option<PathBuf>,
    pub mode: Option<BindingMode>,
}

impl Manifest {
    /// Parses manifest text.
    /// # Errors
    /// `HookError::Manifest` on malformed TOML
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|e| HookError::Manifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads a manifest from disk.
    /// # Errors
    /// on unreadable or malformed files
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
        Self::parse(&text, path)
    }

    /// Loads the manifest, logging failures and treating them as an empty manifest
    #[must_use]
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(m) => m,
            Err(e) => {
                error!("Ignoring manifest: {e}");
                Self::default()
            }
        }
    }
}

/// Merges manifest entries and cli type names, manifest first, first occurrence wins
#[must_use]
pub fn resolve_targets(manifest: &Manifest, cli_types: &[String], project: &Path) -> Vec<Target> {
    let mut merged: IndexMap<String, Target> = IndexMap::new();

    for entry in &manifest.bindings {
        let name = entry.type_name.trim();
        if name.is_empty() {
            warn!("Skipping manifest entry with empty type name");
            continue;
        }
        merged.entry(name.to_string()).or_insert_with(|| Target {
            type_name: name.to_string(),
            source: entry.source.as_ref().map(|s| project.join(s)),
            mode: entry.mode,
        });
    }

    for name in cli_types.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        merged.entry(name.to_string()).or_insert_with(|| Target {
            type_name: name.to_string(),
            source: None,
            mode: None,
        });
    }

    merged.into_values().collect()
}
