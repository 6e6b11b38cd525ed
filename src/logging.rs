// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tracing subscriber for the `tscat` binary
//!
//! Filter precedence: `TSCAT_LOG` (full `EnvFilter` syntax, e.g.
//! `ts_catalog::ts=trace`), then `--verbose` (debug), then the configured
//! level. Output goes to stderr so report output on stdout stays clean.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "TSCAT_LOG";

pub fn init(level: &str, verbose: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_env(LOG_ENV) {
        Ok(filter) => filter,
        Err(_) => {
            let level = if verbose { "debug" } else { level };
            EnvFilter::try_new(format!("ts_catalog={},tscat={}", level, level))
                .map_err(|err| anyhow!("invalid log level {:?}: {}", level, err))?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init()
        .map_err(|err| anyhow!("failed to install tracing subscriber: {}", err))
}
