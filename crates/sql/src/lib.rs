//! # querylog-sql
//!
//! Log adapters for a relational access layer.
//!
//! The access layer reports each executed statement as a template plus its
//! positional arguments. This crate turns that into a readable line:
//!
//! ```text
//! [SQL] #:    1 |     1.204ms | SELECT * FROM users WHERE id = '42' | src/repo.rs:31
//! ```
//!
//! - [`render`] substitutes `$N` / `?` placeholders with quoted literals
//! - [`SqlEvent`] is the closed set of things the access layer reports
//! - [`SqlLogger`] is the emitter capability, fulfilled by [`SilentLogger`],
//!   [`TracingLogger`] and [`PlainLogger`]
//! - [`trace_statement`] times an execution and emits its statement event

#![warn(missing_docs)]

mod event;
mod logger;
mod param;
mod render;
mod trace;

pub use event::{Field, SqlEvent, StatementEvent};
pub use logger::{logger_from_config, PlainLogger, SilentLogger, SqlLogger, TracingLogger, MODULE};
pub use param::{DriverValue, Param, Valuer, ValuerError};
pub use render::{render, render_literal};
pub use trace::trace_statement;
