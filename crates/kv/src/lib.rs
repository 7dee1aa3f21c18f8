//! # querylog-kv
//!
//! Command logging for Redis-style key-value connections.
//!
//! [`LoggedConnection`] wraps any [`Connection`] and implements the same
//! trait, so it drops in wherever the bare connection was used. Each executed
//! command is timed and logged with a summary of its reply:
//!
//! ```text
//! [Redis] #:   3 |     212.4µs |          string | KEYS user:* | src/cache.rs:88
//! ```
//!
//! [`Helper`] layers bulk operations (delete by pattern, set many, set many
//! with expiry) over a connection.

#![warn(missing_docs)]

mod arg;
mod command;
mod connection;
mod helper;
mod logged;
mod reply;
pub mod testing;

pub use arg::Arg;
pub use command::render_command;
pub use connection::Connection;
pub use helper::{BulkOutcome, Helper};
pub use logged::{
    logger_from_config, CommandOutcome, CommandRecord, KvLogger, LoggedConnection, PlainKvLogger,
    TracingKvLogger, MODULE,
};
pub use reply::{summarize, Reply, ReplySummary};

pub use querylog_core::{Error, Result};
