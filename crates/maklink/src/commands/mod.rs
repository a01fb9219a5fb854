//! Command handlers and shared plumbing.

pub mod config_cmd;
pub mod grills;
pub mod run;
pub mod set_temp;
pub mod status;

use std::time::Duration;

use maklink_api::{GrillClient, GrillListEntry, TransportConfig};
use maklink_config::Config;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Load the config file and fold in CLI / env overrides.
pub fn effective_config(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = match &global.config {
        Some(path) => maklink_config::load_config_from(path)?,
        None => maklink_config::load_config()?,
    };
    if let Some(base_url) = &global.base_url {
        cfg.base_url.clone_from(base_url);
    }
    if global.username.is_some() {
        cfg.username.clone_from(&global.username);
    }
    if global.password.is_some() {
        cfg.password.clone_from(&global.password);
    }
    if let Some(poll_interval) = global.poll_interval {
        cfg.poll_interval = poll_interval;
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }
    Ok(cfg)
}

/// Resolve settings and build a ready-to-use client.
///
/// Returns the client plus the configured poll interval (only `run`
/// cares about the latter).
pub fn build_client(global: &GlobalOpts) -> Result<(GrillClient, Duration), CliError> {
    let settings = effective_config(global)?.bridge_settings()?;
    let transport = TransportConfig {
        timeout: settings.timeout,
        ..TransportConfig::default()
    };
    let client = GrillClient::new(
        settings.base_url,
        settings.username,
        settings.password,
        &transport,
    )?;
    Ok((client, settings.poll_interval))
}

/// Find one grill by exact id or case-insensitive display name.
pub async fn resolve_grill(
    client: &GrillClient,
    identifier: &str,
) -> Result<GrillListEntry, CliError> {
    let grills = client.list_grills().await?;
    grills
        .into_iter()
        .find(|g| {
            g.grill_id.as_str() == identifier || g.name.eq_ignore_ascii_case(identifier)
        })
        .ok_or_else(|| CliError::GrillNotFound {
            identifier: identifier.to_owned(),
        })
}
