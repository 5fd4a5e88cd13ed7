// Copyright 2026
// SPDX-License-Identifier: Apache-2.0

use crate::config::Config;
use clap::Parser;
use std::ffi::OsString;

/// implements config init from cli arguments
impl Config {
    /// loads config from cli arguments, making paths absolute
    /// # Errors
    /// when the arguments do not parse; the error renders clap's usage text
    pub fn try_from_cli<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Config::try_parse_from(args).map(Config::normalize)
    }

    /// loads config from cli arguments, exiting with usage on bad input
    #[must_use]
    pub fn from_cli<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Config::parse_from(args).normalize()
    }
}
