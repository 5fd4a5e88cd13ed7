// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::platform::Platform;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How the binder process gets started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchStrategy {
    Direct,
    ShellOpener,
}

/// User override for the startup capability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LaunchPreference {
    #[default]
    Auto,
    Direct,
    Shell,
}

/// Picks the launch strategy once, before any binder runs.
#[must_use]
pub fn select_strategy(
    preference: LaunchPreference,
    platform: Platform,
    binder: &Path,
) -> LaunchStrategy {
    match preference {
        LaunchPreference::Direct => LaunchStrategy::Direct,
        LaunchPreference::Shell => LaunchStrategy::ShellOpener,
        LaunchPreference::Auto => {
            if is_executable(binder) {
                return LaunchStrategy::Direct;
            }
            let opener = platform.shell_opener().program;
            if find_on_path(opener).is_some() {
                debug!(
                    "{} is not directly executable, launching through {opener}",
                    binder.display()
                );
                LaunchStrategy::ShellOpener
            } else {
                warn!(
                    "{} is not directly executable and {opener} is not on PATH",
                    binder.display()
                );
                LaunchStrategy::Direct
            }
        }
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Searches `PATH` for a program, honouring `PATHEXT`-style `.exe` on Windows
#[must_use]
pub fn find_on_path(program: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths).find_map(|dir| {
        let candidate = dir.join(program);
        if candidate.is_file() {
            return Some(candidate);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{program}.exe"));
            if exe.is_file() {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_overrides_check() {
        let missing = Path::new("/definitely/not/here/Binder-Linux");
        assert_eq!(
            select_strategy(LaunchPreference::Direct, Platform::Linux, missing),
            LaunchStrategy::Direct
        );
        assert_eq!(
            select_strategy(LaunchPreference::Shell, Platform::Linux, missing),
            LaunchStrategy::ShellOpener
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_executable_binder_runs_directly() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let binder = dir.path().join("Binder-Linux");
        std::fs::write(&binder, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&binder, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(
            select_strategy(LaunchPreference::Auto, Platform::Linux, &binder),
            LaunchStrategy::Direct
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_binder_is_not_direct_capable() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let binder = dir.path().join("Binder-Linux");
        std::fs::write(&binder, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&binder, std::fs::Permissions::from_mode(0o644)).unwrap();

        assert!(!is_executable(&binder));
    }

    #[cfg(unix)]
    #[test]
    fn test_find_on_path() {
        assert!(find_on_path("sh").is_some());
        assert!(find_on_path("no-such-program-binder-hook").is_none());
    }
}
