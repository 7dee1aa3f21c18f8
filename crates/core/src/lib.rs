//! Shared plumbing for the querylog adapters
//!
//! This crate holds the pieces both the SQL and the key-value adapters rely on:
//! - Error: the error enum returned by connections and bulk helpers
//! - LogConfig: TOML-backed logging configuration
//! - LineSink: the mutex-guarded destination used by plain-text emitters
//! - init_subscriber: installs the `tracing` subscriber structured emitters log through
//! - format_timestamp: the RFC 3339 rendering shared by every renderer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod sink;
pub mod subscriber;
pub mod time;

pub use config::{LogConfig, LogFormat, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use sink::LineSink;
pub use subscriber::init_subscriber;
pub use time::{format_duration, format_timestamp};
