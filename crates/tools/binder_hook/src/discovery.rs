// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use ignore::WalkBuilder;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Editor and compiler output folders never hold hand-written interfaces
const SKIPPED_DIRS: &[&str] = &["Library", "Temp", "obj", "bin", "Logs"];

/// Lexical matcher for one target type
#[derive(Debug, Clone)]
pub struct InterfaceMatcher {
    markers: [String; 2],
    declaration: Regex,
}

impl InterfaceMatcher {
    /// Builds a matcher for `type_name` marked with `marker` (e.g. `[GenerateBindings]`)
    /// # Errors
    /// when the declaration pattern exceeds the regex size limit
    pub fn new(type_name: &str, marker: &str) -> Result<Self, regex::Error> {
        let declaration = Regex::new(&format!(
            r"(?m)^(?:[^/\n]|/[^/\n])*\binterface\s+{}\b",
            regex::escape(type_name)
        ))?;

        Ok(Self {
            markers: [marker.to_string(), attribute_spelling(marker)],
            declaration,
        })
    }

    /// True when the source text carries the marker and declares the type
    #[must_use]
    pub fn matches(&self, source: &str) -> bool {
        self.markers.iter().any(|m| source.contains(m.as_str()))
            && self.declaration.is_match(source)
    }
}

/// `[GenerateBindings]` -> `[GenerateBindingsAttribute]`
fn attribute_spelling(marker: &str) -> String {
    match marker.strip_suffix(']') {
        Some(head) if !head.ends_with("Attribute") => format!("{head}Attribute]"),
        _ => marker.to_string(),
    }
}

/// Walks `root` and returns the first source file that marks and declares `type_name`.
#[must_use]
pub fn find_interface_source(
    root: &Path,
    type_name: &str,
    marker: &str,
    extensions: &[String],
) -> Option<PathBuf> {
    let matcher = match InterfaceMatcher::new(type_name, marker) {
        Ok(m) => m,
        Err(e) => {
            error!("Cannot build matcher for {type_name}: {e}");
            return None;
        }
    };

    let walker = WalkBuilder::new(root)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !(is_dir && entry.depth() > 0 && SKIPPED_DIRS.iter().any(|d| entry.file_name() == *d))
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        let path = entry.path();
        if !has_extension(path, extensions) {
            continue;
        }

        // marker and identifiers are ASCII, legacy encodings still match
        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => {
                debug!("Skipping {}: {e}", path.display());
                continue;
            }
        };

        if matcher.matches(&String::from_utf8_lossy(&bytes)) {
            info!("Found {type_name} in {}", path.display());
            return Some(path.to_path_buf());
        }
    }

    None
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}
