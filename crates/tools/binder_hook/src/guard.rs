// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Suppresses hook runs triggered by the hook's own generated output.
///
/// Each trigger may be a fresh process, so the last run is kept in a stamp
/// file holding Unix milliseconds. A fixed window is only an approximation:
/// a legitimate rebuild inside the window is skipped too.
#[derive(Debug, Clone)]
pub struct CooldownGuard {
    window: Duration,
    state_file: PathBuf,
}

impl CooldownGuard {
    #[must_use]
    pub fn new(window: Duration, state_file: impl Into<PathBuf>) -> Self {
        Self {
            window,
            state_file: state_file.into(),
        }
    }

    #[must_use]
    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    fn last_run(&self) -> Option<SystemTime> {
        let text = std::fs::read_to_string(&self.state_file).ok()?;
        match text.trim().parse::<u64>() {
            Ok(ms) => Some(UNIX_EPOCH + Duration::from_millis(ms)),
            Err(e) => {
                debug!("Ignoring corrupt stamp {}: {e}", self.state_file.display());
                None
            }
        }
    }

    /// False when the previous run is still inside the cooldown window
    #[must_use]
    pub fn should_run(&self, now: SystemTime) -> bool {
        if self.window.is_zero() {
            return true;
        }
        match self.last_run() {
            // a stamp from the future counts as elapsed
            Some(last) => now
                .duration_since(last)
                .map_or(true, |elapsed| elapsed >= self.window),
            None => true,
        }
    }

    /// Stores `now` as the last run; failures only warn
    pub fn record(&self, now: SystemTime) {
        let ms = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        if let Some(parent) = self.state_file.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!("Could not create {}: {e}", parent.display());
            return;
        }
        if let Err(e) = std::fs::write(&self.state_file, ms.to_string()) {
            warn!("Could not write stamp {}: {e}", self.state_file.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(dir: &Path, secs: u64) -> CooldownGuard {
        CooldownGuard::new(Duration::from_secs(secs), dir.join(".binder-hook.stamp"))
    }

    #[test]
    fn test_first_run_allowed() {
        let dir = tempfile::tempdir().unwrap();
        assert!(guard(dir.path(), 5).should_run(SystemTime::now()));
    }

    #[test]
    fn test_second_run_inside_window_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let g = guard(dir.path(), 5);
        let t0 = SystemTime::now();
        g.record(t0);

        assert!(!g.should_run(t0 + Duration::from_secs(1)));
        assert!(g.should_run(t0 + Duration::from_secs(5)));
        assert!(g.should_run(t0 + Duration::from_secs(60)));
    }

    #[test]
    fn test_future_stamp_counts_as_elapsed() {
        let dir = tempfile::tempdir().unwrap();
        let g = guard(dir.path(), 5);
        let t0 = SystemTime::now();
        g.record(t0 + Duration::from_secs(3600));
        assert!(g.should_run(t0));
    }

    #[test]
    fn test_zero_window_disables_guard() {
        let dir = tempfile::tempdir().unwrap();
        let g = guard(dir.path(), 0);
        let t0 = SystemTime::now();
        g.record(t0);
        assert!(g.should_run(t0));
    }

    #[test]
    fn test_corrupt_stamp_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let g = guard(dir.path(), 5);
        std::fs::write(g.state_file(), "not a number").unwrap();
        assert!(g.should_run(SystemTime::now()));
    }

    #[test]
    fn test_record_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let g = CooldownGuard::new(Duration::from_secs(5), dir.path().join("a/b/stamp"));
        g.record(SystemTime::now());
        assert!(g.state_file().is_file());
    }
}
