//! Logging configuration via `querylog.toml`
//!
//! Every setting has a default, so an empty file (or no file at all) yields a
//! working configuration: logging enabled, structured output, `info` filter.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Config file name conventionally placed next to the application.
pub const CONFIG_FILE_NAME: &str = "querylog.toml";

/// Which emitter family renders log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Named fields on `tracing` events
    Structured,
    /// One preformatted text line per record
    Plain,
}

/// Logging configuration loaded from `querylog.toml`.
///
/// # Example
///
/// ```toml
/// enabled = true
/// format = "plain"
/// filter = "querylog=debug"
/// source = true
/// json = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Whether intercepted operations are logged at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// `"structured"` or `"plain"`.
    #[serde(default = "default_format_str")]
    pub format: String,
    /// `tracing` env-filter directive used by [`crate::init_subscriber`].
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Record the caller's source location on each record.
    #[serde(default = "default_enabled")]
    pub source: bool,
    /// Emit JSON lines from the installed subscriber instead of text.
    #[serde(default)]
    pub json: bool,
}

fn default_enabled() -> bool {
    true
}

fn default_format_str() -> String {
    "structured".to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            format: default_format_str(),
            filter: default_filter(),
            source: default_enabled(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Parse the format string into a [`LogFormat`].
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `"structured"` or `"plain"`.
    pub fn log_format(&self) -> Result<LogFormat> {
        match self.format.as_str() {
            "structured" => Ok(LogFormat::Structured),
            "plain" => Ok(LogFormat::Plain),
            other => Err(Error::invalid_config(format!(
                "invalid format '{}'. Expected \"structured\" or \"plain\".",
                other
            ))),
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# querylog configuration
#
# Log intercepted SQL statements and key-value commands (default: true)
enabled = true

# Emitter family: "structured" (tracing fields, default) or "plain" (text lines)
format = "structured"

# tracing env-filter directive; RUST_LOG overrides it when set
filter = "info"

# Record the caller's file:line on every record (default: true)
source = true

# Emit JSON lines from the installed subscriber (default: false)
json = false
"#
    }

    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or names an unknown format.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: LogConfig = toml::from_str(content)
            .map_err(|e| Error::invalid_config(format!("failed to parse config: {}", e)))?;
        config.log_format()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Write the default config file if it does not already exist.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }
}
