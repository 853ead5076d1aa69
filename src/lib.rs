// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! Reconciliation handlers for log metric filters and subscription filters.
//!
//! This crate re-exports the workspace so a host can depend on one package:
//!
//! * [`sdk`] – remote API request, response and error shapes.
//! * [`error`] – handler error taxonomy and remote-error classification.
//! * [`core`] – resource models, progress events and model validation.
//! * [`translator`] – model ↔ remote request/response mapping.
//! * [`client`] – the [`LogsClient`](client::LogsClient) seam.
//! * [`config`] – handler configuration.
//! * [`handlers`] – the lifecycle handlers and [`dispatch`](handlers::dispatch).

use std::path::Path;

use anyhow::Context;

pub use lfh_client as client;
pub use lfh_config as config;
pub use lfh_core as core;
pub use lfh_error as error;
pub use lfh_handlers as handlers;
pub use lfh_sdk_types as sdk;
pub use lfh_translator as translator;

pub use lfh_handlers::{MetricFilterHandler, ResourceHandler, SubscriptionFilterHandler, dispatch};

/// Load handler configuration (file, then `LFH_*` overrides) and validate it.
///
/// Returns the effective configuration together with any advisory warnings.
pub fn load_handler_config(
    path: Option<&Path>,
) -> anyhow::Result<(config::HandlerConfig, Vec<config::ConfigWarning>)> {
    let cfg = config::load_config(path).context("load handler config")?;
    let warnings = config::validate_config(&cfg).context("validate handler config")?;
    for warning in &warnings {
        tracing::warn!(target: "lfh.config", %warning, "config warning");
    }
    Ok((cfg, warnings))
}
