// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::binder::{invoke, locate_binder, relay};
use crate::config::Config;
use crate::discovery::find_interface_source;
use crate::error::Result;
use crate::guard::CooldownGuard;
use crate::launch::select_strategy;
use crate::manifest::{Manifest, Target, resolve_targets};
use crate::platform::Platform;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, error, info, warn};

/// Signal that an assembly has just finished compiling
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyCompiled {
    pub name: String,
}

impl AssemblyCompiled {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Names the event after the assembly file stem (`Assembly-CSharp.dll` -> `Assembly-CSharp`)
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { name }
    }
}

/// Outcome of one hook run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookReport {
    /// the event was filtered out or suppressed by the cooldown
    pub skipped: bool,
    pub generated: usize,
    pub failed: usize,
}

impl HookReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

fn strip_dll(name: &str) -> &str {
    let len = name.len();
    if len > 4 && name.is_char_boundary(len - 4) && name[len - 4..].eq_ignore_ascii_case(".dll") {
        &name[..len - 4]
    } else {
        name
    }
}

/// Compares assembly names, ignoring a `.dll` suffix
#[must_use]
pub fn is_main_assembly(main: &str, compiled: &str) -> bool {
    strip_dll(main.trim()) == strip_dll(compiled.trim())
}

fn resolve_source(config: &Config, target: &Target) -> Option<PathBuf> {
    if let Some(source) = &target.source {
        if source.is_file() {
            return Some(source.clone());
        }
        warn!(
            "Manifest source {} for {} does not exist, scanning project",
            source.display(),
            target.type_name
        );
    }
    find_interface_source(
        &config.project,
        &target.type_name,
        &config.marker,
        &config.extensions,
    )
}

/// Reacts to a compiled assembly using the current wall clock.
/// # Errors
/// only `HookError::UnsupportedPlatform`; every other failure is logged
pub async fn run_hook(config: &Config, event: &AssemblyCompiled) -> Result<HookReport> {
    run_hook_at(config, event, SystemTime::now()).await
}

/// Reacts to a compiled assembly as if it happened at `now`.
/// # Errors
/// only `HookError::UnsupportedPlatform`; every other failure is logged
pub async fn run_hook_at(
    config: &Config,
    event: &AssemblyCompiled,
    now: SystemTime,
) -> Result<HookReport> {
    if !is_main_assembly(&config.main_assembly, &event.name) {
        debug!("Ignoring compiled assembly {}", event.name);
        return Ok(HookReport::skipped());
    }

    let platform = Platform::current()?;

    let guard = CooldownGuard::new(config.cooldown(), config.stamp_file());
    if !guard.should_run(now) {
        info!(
            "Skipping {}: last run is within the {}s cooldown",
            event.name, config.cooldown_secs
        );
        return Ok(HookReport::skipped());
    }
    guard.record(now);

    let manifest = config
        .manifest
        .as_deref()
        .map(Manifest::load_or_empty)
        .unwrap_or_default();
    let targets = resolve_targets(&manifest, &config.types, &config.project);
    if targets.is_empty() {
        warn!("No interface types configured for binding generation");
        return Ok(HookReport::default());
    }

    let mut report = HookReport::default();

    let search_dirs = config.binder_search_dirs();
    let Some(binder) = locate_binder(&search_dirs, platform, &config.tool) else {
        error!(
            "Binder {} not found in {:?}",
            platform.binder_file_name(&config.tool),
            search_dirs
        );
        report.failed = targets.len();
        return Ok(report);
    };
    let strategy = select_strategy(config.launch, platform, &binder);
    let output_dir = config.output_dir();

    for target in &targets {
        let Some(source) = resolve_source(config, target) else {
            error!(
                "No source file in {} marks and declares {}",
                config.project.display(),
                target.type_name
            );
            report.failed += 1;
            continue;
        };

        let mode = target.mode.unwrap_or(config.mode);
        match invoke(&binder, &source, &output_dir, mode, strategy, platform).await {
            Ok(output) => {
                relay(&output);
                if output.status.success() {
                    report.generated += 1;
                } else {
                    report.failed += 1;
                }
            }
            Err(e) => {
                error!("{e}");
                report.failed += 1;
            }
        }
    }

    info!(
        generated = report.generated,
        failed = report.failed,
        "Binding generation finished for {}",
        event.name
    );
    Ok(report)
}
