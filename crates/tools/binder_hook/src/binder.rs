// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::error::{HookError, Result};
use crate::launch::LaunchStrategy;
use crate::platform::Platform;
use clap::ValueEnum;
use serde::Deserialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tokio::process::Command;
use tracing::{debug, error, info, warn};

/// Which side of the interop boundary the binder generates code for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BindingMode {
    #[default]
    Host,
    Client,
}

impl BindingMode {
    /// Activation flag passed as the binder's third argument
    #[must_use]
    pub fn activation_flag(self) -> &'static str {
        match self {
            BindingMode::Host => "--host",
            BindingMode::Client => "--client",
        }
    }
}

/// Everything the binder wrote, captured after it exited
#[derive(Debug, Clone)]
pub struct BinderOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Returns the first existing `<dir>/<tool>-<platform>` binder in `search_dirs`
#[must_use]
pub fn locate_binder(search_dirs: &[PathBuf], platform: Platform, tool: &str) -> Option<PathBuf> {
    let file_name = platform.binder_file_name(tool);
    search_dirs.iter().map(|dir| dir.join(&file_name)).find(|candidate| {
        let found = candidate.is_file();
        debug!("Binder candidate {} exists: {found}", candidate.display());
        found
    })
}

/// The three positional binder arguments, in order
fn binder_args(
    interface_file: &Path,
    output_dir: &Path,
    mode: BindingMode,
) -> Result<[OsString; 3]> {
    let interface_file =
        std::path::absolute(interface_file).map_err(|e| HookError::io(interface_file, e))?;
    let output_dir = std::path::absolute(output_dir).map_err(|e| HookError::io(output_dir, e))?;
    Ok([
        interface_file.into_os_string(),
        output_dir.into_os_string(),
        mode.activation_flag().into(),
    ])
}

fn build_command(
    binder: &Path,
    args: &[OsString; 3],
    strategy: LaunchStrategy,
    platform: Platform,
) -> Command {
    match strategy {
        LaunchStrategy::Direct => {
            let mut cmd = Command::new(binder);
            cmd.args(args);
            cmd
        }
        LaunchStrategy::ShellOpener => {
            let opener = platform.shell_opener();
            let mut cmd = Command::new(opener.program);
            cmd.args(opener.leading_args).arg(binder);
            if let Some(sep) = opener.args_separator {
                cmd.arg(sep);
            }
            cmd.args(args);
            cmd
        }
    }
}

/// Runs the binder for one interface file and captures its output.
///
/// The output directory is created first when missing.
/// # Errors
/// when the output directory cannot be created or the process cannot be started
pub async fn invoke(
    binder: &Path,
    interface_file: &Path,
    output_dir: &Path,
    mode: BindingMode,
    strategy: LaunchStrategy,
    platform: Platform,
) -> Result<BinderOutput> {
    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|e| HookError::io(output_dir, e))?;

    let args = binder_args(interface_file, output_dir, mode)?;
    let mut cmd = build_command(binder, &args, strategy, platform);
    cmd.kill_on_drop(true);

    info!(
        binder = %binder.display(),
        ?strategy,
        flag = mode.activation_flag(),
        "Running binder for {}",
        interface_file.display()
    );

    let output = cmd.output().await.map_err(|source| HookError::Launch {
        program: cmd.as_std().get_program().to_string_lossy().into_owned(),
        source,
    })?;

    Ok(BinderOutput {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Surfaces captured binder output as log lines; empty streams log nothing
pub fn relay(output: &BinderOutput) {
    if !output.stdout.is_empty() {
        info!("{}", output.stdout);
    }
    if !output.stderr.is_empty() {
        error!("{}", output.stderr);
    }
    if !output.status.success() {
        warn!("Binder exited with {}", output.status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[cfg(unix)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        ExitStatus::from_raw(code << 8)
    }

    #[cfg(windows)]
    fn exit_status(code: i32) -> ExitStatus {
        use std::os::windows::process::ExitStatusExt;
        ExitStatus::from_raw(code as u32)
    }

    #[test]
    fn test_activation_flags() {
        assert_eq!(BindingMode::Host.activation_flag(), "--host");
        assert_eq!(BindingMode::Client.activation_flag(), "--client");
        assert_eq!(BindingMode::default(), BindingMode::Host);
    }

    #[test]
    fn test_locate_binder_searches_in_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join("Binder-Linux"), "").unwrap();

        let dirs = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(
            locate_binder(&dirs, Platform::Linux, "Binder"),
            Some(second.path().join("Binder-Linux"))
        );

        std::fs::write(first.path().join("Binder-Linux"), "").unwrap();
        assert_eq!(
            locate_binder(&dirs, Platform::Linux, "Binder"),
            Some(first.path().join("Binder-Linux"))
        );
        assert_eq!(locate_binder(&dirs, Platform::Windows, "Binder"), None);
    }

    #[test]
    fn test_shell_opener_command_layout() {
        let args = [
            OsString::from("/p/IFoo.cs"),
            OsString::from("/p/out"),
            OsString::from("--host"),
        ];
        let cmd = build_command(
            Path::new("/tools/Binder-OSX"),
            &args,
            LaunchStrategy::ShellOpener,
            Platform::MacOs,
        );
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "open");
        let got: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(
            got,
            ["-W", "/tools/Binder-OSX", "--args", "/p/IFoo.cs", "/p/out", "--host"]
        );
    }

    #[test]
    #[traced_test]
    fn test_relay_non_empty_streams() {
        let output = BinderOutput {
            status: exit_status(0),
            stdout: "generated IFoo.g.cs".to_string(),
            stderr: "warning: unsupported return type".to_string(),
        };
        relay(&output);
        assert!(logs_contain("generated IFoo.g.cs"));
        assert!(logs_contain("warning: unsupported return type"));
        assert!(!logs_contain("Binder exited with"));
    }

    #[test]
    #[traced_test]
    fn test_relay_suppresses_empty_streams() {
        let output = BinderOutput {
            status: exit_status(0),
            stdout: String::new(),
            stderr: String::new(),
        };
        relay(&output);
        assert!(!logs_contain("INFO"));
        assert!(!logs_contain("ERROR"));
    }

    #[test]
    #[traced_test]
    fn test_relay_reports_failure_status() {
        let output = BinderOutput {
            status: exit_status(3),
            stdout: String::new(),
            stderr: "bad interface".to_string(),
        };
        relay(&output);
        assert!(logs_contain("bad interface"));
        assert!(logs_contain("Binder exited with"));
    }
}
