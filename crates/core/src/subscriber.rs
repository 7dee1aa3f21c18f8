//! `tracing` subscriber installation for the structured emitters

use tracing_subscriber::EnvFilter;

use crate::{Error, LogConfig, Result};

/// Install a global fmt subscriber configured from `config`.
///
/// `RUST_LOG` takes precedence over `config.filter` when it is set.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global subscriber
/// has already been installed.
pub fn init_subscriber(config: &LogConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            Error::invalid_config(format!("invalid filter '{}': {}", config.filter, e))
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let installed = if config.json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::invalid_config(format!("subscriber already installed: {}", e)))?;
    tracing::debug!(target: "querylog", format = %config.format, json = config.json, "Subscriber installed");
    Ok(())
}
