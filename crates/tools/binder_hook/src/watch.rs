// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::config::Config;
use crate::error::{HookError, Result};
use crate::hook::{AssemblyCompiled, run_hook};
use notify::{Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::OsString;
use std::path::Path;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

/// Turns create/modify notifications for one compiled assembly into events.
///
/// Only changes after the watcher starts count; an assembly already on disk
/// is not an event.
pub struct AssemblyWatcher {
    rx: UnboundedReceiver<AssemblyCompiled>,
    _watcher: RecommendedWatcher,
}

fn is_rebuild(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_))
}

impl AssemblyWatcher {
    /// Watches the directory holding `assembly_path`.
    /// # Errors
    /// `HookError::Watch` when the directory cannot be watched
    pub fn new(assembly_path: &Path) -> Result<Self> {
        let watch_error = |message: String| HookError::Watch {
            path: assembly_path.to_path_buf(),
            message,
        };

        let file_name: OsString = assembly_path
            .file_name()
            .ok_or_else(|| watch_error("not a file path".to_string()))?
            .to_os_string();
        let dir = match assembly_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        let compiled = AssemblyCompiled::from_path(assembly_path);
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    // the parent is watched non-recursively, the file name is enough
                    if is_rebuild(&event.kind)
                        && event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == Some(file_name.as_os_str()))
                    {
                        let _ = tx.send(compiled.clone());
                    }
                }
                Err(e) => warn!("Watch error: {e}"),
            },
            NotifyConfig::default(),
        )
        .map_err(|e| watch_error(e.to_string()))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(e.to_string()))?;

        Ok(Self {
            rx,
            _watcher: watcher,
        })
    }

    /// Waits for the next rebuild, folding the burst of notifications one
    /// rebuild produces (within `debounce`) into a single event
    pub async fn next_event(&mut self, debounce: Duration) -> Option<AssemblyCompiled> {
        let event = self.rx.recv().await?;
        if !debounce.is_zero() {
            tokio::time::sleep(debounce).await;
        }
        let mut folded = 0usize;
        while self.rx.try_recv().is_ok() {
            folded += 1;
        }
        if folded > 0 {
            debug!("Folded {folded} notifications into one rebuild of {}", event.name);
        }
        Some(event)
    }
}

/// Runs the hook for every rebuild of `assembly_path` until cancelled.
/// # Errors
/// when the assembly folder cannot be watched or a hook run fails fatally
pub async fn watch(config: &Config, assembly_path: &Path, debounce: Duration) -> Result<()> {
    let mut watcher = AssemblyWatcher::new(assembly_path)?;

    info!(
        "Watching {} (debounce {}ms)",
        assembly_path.display(),
        debounce.as_millis()
    );

    while let Some(event) = watcher.next_event(debounce).await {
        info!("{} was rebuilt", event.name);
        run_hook(config, &event).await?;
    }
    Ok(())
}
