//! Logging init for applications embedding img-get: stderr `fmt` subscriber.
//!
//! The library only emits `tracing` events; installing a subscriber is
//! optional and left to the caller.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,img_get=debug";

/// Installs a global stderr subscriber filtered by `RUST_LOG`
/// (default `info,img_get=debug`). Returns Err if one is already installed.
pub fn init_logging() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))?;

    tracing::debug!("img-get logging initialized");
    Ok(())
}
