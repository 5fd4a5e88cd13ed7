// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::config::Config;
use crate::logger::init_logger;
use std::ffi::OsString;
use tracing::{debug, info};

/// loads `.env`, parses the cli and starts logging
#[must_use]
pub fn init_main<I, T>(args: I) -> Config
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let dotenv = dotenvy::dotenv();
    let config = Config::from_cli(args);
    init_logger(config.log_level.as_deref(), config.log_file.as_deref());

    if let Ok(path) = dotenv {
        debug!("Loaded environment from {}", path.display());
    }
    info!(
        project = %config.project.display(),
        output = %config.output_dir().display(),
        mode = config.mode.activation_flag(),
        "binder-hook {}",
        env!("CARGO_PKG_VERSION")
    );
    config
}
