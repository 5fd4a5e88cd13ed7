// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::binder::BindingMode;
use crate::launch::LaunchPreference;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Output folder used when `--output` is not given, relative to the project
pub const DEFAULT_OUTPUT_DIR: &str = "Generated/Bindings";
/// Binder folder searched before the project root
pub const DEFAULT_BINDER_DIR: &str = "Tools/Binder";
pub const STAMP_FILE_NAME: &str = ".binder-hook.stamp";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "binder-hook",
    version,
    about = "Runs the interop binder for marked interfaces after the main assembly compiles"
)]
pub struct Config {
    /// project root scanned for interface sources
    #[arg(long, env = "BINDER_HOOK_PROJECT", default_value = ".", global = true)]
    pub project: PathBuf,

    /// directory receiving generated bindings
    #[arg(long, env = "BINDER_HOOK_OUTPUT", global = true)]
    pub output: Option<PathBuf>,

    /// directories searched for the binder executable, in order
    #[arg(
        long = "binder-dir",
        env = "BINDER_HOOK_BINDER_DIRS",
        value_delimiter = ',',
        global = true
    )]
    pub binder_dirs: Vec<PathBuf>,

    /// binder base name, platform suffix is appended
    #[arg(long, env = "BINDER_HOOK_TOOL", default_value = "Binder", global = true)]
    pub tool: String,

    #[arg(
        long,
        env = "BINDER_HOOK_MARKER",
        default_value = "[GenerateBindings]",
        global = true
    )]
    pub marker: String,

    /// source file extensions considered by the scan
    #[arg(
        long = "extension",
        env = "BINDER_HOOK_EXTENSIONS",
        value_delimiter = ',',
        default_value = "cs",
        global = true
    )]
    pub extensions: Vec<String>,

    /// interface type names to generate bindings for
    #[arg(
        long = "type",
        env = "BINDER_HOOK_TYPES",
        value_delimiter = ',',
        global = true
    )]
    pub types: Vec<String>,

    /// TOML manifest listing targets and optional source paths
    #[arg(long, env = "BINDER_HOOK_MANIFEST", global = true)]
    pub manifest: Option<PathBuf>,

    #[arg(
        long,
        env = "BINDER_HOOK_MODE",
        value_enum,
        default_value_t = BindingMode::Host,
        global = true
    )]
    pub mode: BindingMode,

    /// only this assembly triggers generation
    #[arg(
        long,
        env = "BINDER_HOOK_MAIN_ASSEMBLY",
        default_value = "Assembly-CSharp",
        global = true
    )]
    pub main_assembly: String,

    /// self-trigger cooldown, 0 disables it
    #[arg(
        long,
        env = "BINDER_HOOK_COOLDOWN_SECS",
        default_value_t = 5,
        global = true
    )]
    pub cooldown_secs: u64,

    #[arg(long, env = "BINDER_HOOK_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    #[arg(
        long,
        env = "BINDER_HOOK_LAUNCH",
        value_enum,
        default_value_t = LaunchPreference::Auto,
        global = true
    )]
    pub launch: LaunchPreference,

    #[arg(long, env = "BINDER_HOOK_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    #[arg(long, env = "BINDER_HOOK_LOG_FILE", global = true)]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// an assembly has just finished compiling
    Trigger {
        #[arg(long)]
        assembly: String,
    },
    /// watch a compiled assembly and trigger on every rebuild
    Watch {
        #[arg(long)]
        assembly_path: PathBuf,
        /// notifications arriving within this window count as one rebuild
        #[arg(long, alias = "poll-ms", default_value_t = 500)]
        debounce_ms: u64,
    },
}

impl Config {
    /// Makes every configured path absolute against the working directory
    #[must_use]
    pub fn normalize(mut self) -> Self {
        self.project = absolutize(&self.project);
        self.output = self.output.as_deref().map(absolutize);
        self.manifest = self.manifest.as_deref().map(absolutize);
        self.state_file = self.state_file.as_deref().map(absolutize);
        self.binder_dirs = self.binder_dirs.iter().map(|d| absolutize(d)).collect();
        if let Command::Watch { assembly_path, .. } = &mut self.command {
            *assembly_path = absolutize(assembly_path);
        }
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.project.join(DEFAULT_OUTPUT_DIR))
    }

    #[must_use]
    pub fn binder_search_dirs(&self) -> Vec<PathBuf> {
        if self.binder_dirs.is_empty() {
            vec![self.project.join(DEFAULT_BINDER_DIR), self.project.clone()]
        } else {
            self.binder_dirs.clone()
        }
    }

    #[must_use]
    pub fn stamp_file(&self) -> PathBuf {
        self.state_file
            .clone()
            .unwrap_or_else(|| self.output_dir().join(STAMP_FILE_NAME))
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}

/// Joins relative paths onto the working directory; leaves the path as is on failure
#[must_use]
pub fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
