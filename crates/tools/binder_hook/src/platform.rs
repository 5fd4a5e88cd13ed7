// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::error::{HookError, Result};
use std::fmt;

/// Host operating systems the binder ships for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

/// Program plus leading arguments used when the binder cannot be run directly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOpener {
    pub program: &'static str,
    pub leading_args: &'static [&'static str],
    /// inserted between the binder path and the forwarded arguments
    pub args_separator: Option<&'static str>,
}

impl Platform {
    /// Maps an OS identifier to a platform.
    /// # Errors
    /// `HookError::UnsupportedPlatform` for any unknown identifier
    pub fn from_os_id(id: &str) -> Result<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" | "win" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            _ => Err(HookError::UnsupportedPlatform(id.to_string())),
        }
    }

    /// Resolves the platform this process runs on.
    /// # Errors
    /// when the host OS has no binder build
    pub fn current() -> Result<Self> {
        Self::from_os_id(std::env::consts::OS)
    }

    /// File name of the binder build for this platform
    #[must_use]
    pub fn binder_file_name(self, tool: &str) -> String {
        match self {
            Platform::Windows => format!("{tool}-Win.exe"),
            Platform::Linux => format!("{tool}-Linux"),
            Platform::MacOs => format!("{tool}-OSX"),
        }
    }

    #[must_use]
    pub fn shell_opener(self) -> ShellOpener {
        match self {
            Platform::Windows => ShellOpener {
                program: "cmd",
                // empty title, then wait so output capture sees the real run
                leading_args: &["/C", "start", "", "/WAIT"],
                args_separator: None,
            },
            Platform::Linux => ShellOpener {
                program: "xdg-open",
                leading_args: &[],
                args_separator: None,
            },
            Platform::MacOs => ShellOpener {
                program: "open",
                leading_args: &["-W"],
                args_separator: Some("--args"),
            },
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
        };
        f.write_str(name)
    }
}
