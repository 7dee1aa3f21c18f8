//! Integration Tests
//!
//! End-to-end tests through the `querylog` facade:
//! - SQL: positional field lists through every emitter
//! - KV: logged connections, structured and plain
//! - Bulk helpers: stacked on a logged connection
//! - Config: file-driven emitter selection

#[path = "../common/mod.rs"]
mod common;

mod config;
mod sql_logging;
