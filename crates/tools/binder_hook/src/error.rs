// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HookError>;

#[derive(Debug, Error)]
pub enum HookError {
    /// The only failure that aborts a hook run
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}: {message}")]
    Manifest { path: PathBuf, message: String },

    #[error("Cannot watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl HookError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HookError::Io {
            path: path.into(),
            source,
        }
    }
}
