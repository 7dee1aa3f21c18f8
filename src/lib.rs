//! querylog - logging adapters for SQL access layers and key-value connections
//!
//! Two collaborators are covered:
//!
//! - **SQL**: an access layer reports each executed statement as a template
//!   plus positional arguments; [`sql`] renders it as a readable statement and
//!   emits it through a silent, structured, or plain-text [`sql::SqlLogger`].
//! - **Key-value**: [`kv::LoggedConnection`] wraps a Redis-style connection,
//!   times every command and logs it with a summary of the reply.
//!   [`kv::Helper`] adds bulk delete-by-pattern and set operations.
//!
//! # Quick Start
//!
//! ```ignore
//! use querylog::{kv, LineSink, LogConfig};
//! use querylog::kv::Connection;
//!
//! let config = LogConfig::from_file("querylog.toml".as_ref())?;
//! querylog::init_subscriber(&config)?;
//!
//! let mut conn = kv::LoggedConnection::from_config(raw_conn, &config, LineSink::stderr())?;
//! conn.execute("SET", &["greeting".into(), "hello".into()])?;
//!
//! let mut helper = kv::Helper::with_conn(conn);
//! let outcome = helper.delete_all("session:*")?;
//! ```

pub use querylog_core::*;

/// SQL statement rendering and emitters.
pub mod sql {
    pub use querylog_sql::*;
}

/// Key-value command logging and bulk helpers.
pub mod kv {
    pub use querylog_kv::*;
}
