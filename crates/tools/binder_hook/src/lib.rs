// Copyright 2026
// SPDX-License-Identifier: Apache-2.0
//
// binder-hook: runs the external interop binder for interfaces marked
// for binding generation whenever the main project assembly is rebuilt.

pub mod binder;
pub mod config;
pub mod config_from_cli;
pub mod discovery;
pub mod error;
pub mod guard;
pub mod hook;
pub mod launch;
pub mod logger;
pub mod main_init;
pub mod manifest;
pub mod platform;
pub mod watch;

pub use error::{HookError, Result};
pub use hook::{AssemblyCompiled, HookReport, run_hook};
