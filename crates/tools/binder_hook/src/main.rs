// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use binder_hook::config::{Command, Config};
use binder_hook::hook::{AssemblyCompiled, run_hook};
use binder_hook::logger::flush_logger;
use binder_hook::main_init::init_main;
use binder_hook::watch::watch;
use std::process::ExitCode;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let config = init_main(std::env::args_os());

    let result = tokio::select! {
        r = run(&config) => r,
        () = shutdown_signal() => {
            info!("Shutdown signal received, exiting");
            Ok(())
        }
    };

    let code = match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    };
    flush_logger();
    code
}

async fn run(config: &Config) -> anyhow::Result<()> {
    match &config.command {
        Command::Trigger { assembly } => {
            run_hook(config, &AssemblyCompiled::new(assembly.as_str()))
                .await
                .with_context(|| format!("hook run for {assembly} aborted"))?;
        }
        Command::Watch {
            assembly_path,
            debounce_ms,
        } => {
            watch(config, assembly_path, Duration::from_millis(*debounce_ms))
                .await
                .with_context(|| format!("watching {} aborted", assembly_path.display()))?;
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = signal::ctrl_c();

    #[cfg(unix)]
    {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {e}");
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
    }
}
