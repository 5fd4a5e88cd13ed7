// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use std::fs::{File, OpenOptions};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "info";

static GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Accepts a plain level (`debug`) or full filter directives (`binder_hook=trace,info`)
fn build_filter(level: &str) -> Option<EnvFilter> {
    if level.parse::<LevelFilter>().is_ok() || level.contains('=') {
        EnvFilter::try_new(level).ok()
    } else {
        None
    }
}

fn open_log_file(path: &str) -> Result<File, std::io::Error> {
    OpenOptions::new().create(true).append(true).open(path)
}

/// Installs the global subscriber.
///
/// Invalid levels fall back to `info`; an unopenable log file falls back to
/// stderr. Calling it again after a subscriber is set does nothing.
pub fn init_logger(level: Option<&str>, file: Option<&str>) {
    let requested = level.unwrap_or(DEFAULT_LOG_LEVEL);
    let filter = build_filter(requested);
    let invalid_level = filter.is_none();
    let filter = filter.unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let mut file_error = None;
    let log_file = file.and_then(|path| match open_log_file(path) {
        Ok(f) => Some(f),
        Err(e) => {
            file_error = Some(format!("Cannot open log file {path}: {e}, logging to stderr"));
            None
        }
    });

    let installed = match log_file {
        Some(f) => {
            let (writer, guard) = tracing_appender::non_blocking(f);
            let result = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .try_init();
            if result.is_ok()
                && let Ok(mut slot) = GUARD.lock()
            {
                *slot = Some(guard);
            }
            result.is_ok()
        }
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    };

    if installed {
        if invalid_level {
            warn!("Invalid log level '{requested}', using '{DEFAULT_LOG_LEVEL}'");
        }
        if let Some(msg) = file_error {
            warn!("{msg}");
        }
    }
}

/// Flushes pending file output by dropping the appender guard
pub fn flush_logger() {
    if let Ok(mut slot) = GUARD.lock() {
        slot.take();
    }
}
