// SPDX-License-Identifier: MIT
//
// Logging setup: a single fmt layer on stderr so stdout stays clean for
// exported tokens. `STYLEMARK_LOG` takes EnvFilter directives
// (`debug`, `sm_tokens=trace`, …) and wins over the configured level.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

pub const LOG_ENV: &str = "STYLEMARK_LOG";

/// Build the filter from `STYLEMARK_LOG`, falling back to `default_level`.
pub fn env_filter(default_level: &str) -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) if !directives.trim().is_empty() => EnvFilter::try_new(&directives)
            .with_context(|| format!("invalid {LOG_ENV} directives {directives:?}")),
        _ => EnvFilter::try_new(default_level)
            .with_context(|| format!("invalid log level {default_level:?}")),
    }
}

/// Install the global subscriber.
pub fn init(default_level: &str) -> Result<()> {
    let filter = env_filter(default_level)?;
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("failed to install tracing subscriber")?;
    tracing::debug!(level = default_level, "logging initialized");
    Ok(())
}
