// SPDX-License-Identifier: MIT OR Apache-2.0
//! Process-wide tracing setup for a handler host.

use anyhow::{Context, Result};
use lfh_config::{HandlerConfig, LogFormat};
use tracing_subscriber::EnvFilter;

/// Filter for handler targets at the configured level.
///
/// `RUST_LOG`, when set and parseable, wins over the configuration.
pub fn env_filter(config: &HandlerConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    directive_filter(config.effective_log_level())
}

fn directive_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(format!("lfh={level}"))
        .with_context(|| format!("invalid log level '{level}'"))
}

/// Install the global subscriber.
///
/// Only the first call in a process installs anything; later calls return an
/// error and leave the existing subscriber in place.
pub fn init_logging(config: &HandlerConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    let installed = match config.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))
}
