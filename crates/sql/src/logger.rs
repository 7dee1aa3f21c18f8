//! SQL log emitters
//!
//! Three interchangeable fulfillments of [`SqlLogger`]:
//!
//! | Emitter | Output |
//! |---------|--------|
//! | [`SilentLogger`] | nothing, ever |
//! | [`TracingLogger`] | `tracing` events with named fields, target `querylog::sql` |
//! | [`PlainLogger`] | one text line per event through a [`LineSink`] |

use querylog_core::{format_duration, LineSink, LogConfig, LogFormat, Result};
use std::sync::Arc;
use tracing::{info, Dispatch};

use crate::event::{Field, SqlEvent, StatementEvent};

/// Module tag attached to every SQL record.
pub const MODULE: &str = "sql";

/// Capability to accept one access-layer event and emit (or drop) it.
pub trait SqlLogger: Send + Sync {
    /// Emit one event.
    fn log(&self, event: &SqlEvent);

    /// Classify a positional field list and emit it, see [`SqlEvent::from_fields`].
    fn print(&self, fields: &[Field]) {
        if let Some(event) = SqlEvent::from_fields(fields) {
            self.log(&event);
        }
    }
}

impl<L: SqlLogger + ?Sized> SqlLogger for &L {
    fn log(&self, event: &SqlEvent) {
        (**self).log(event)
    }

    fn print(&self, fields: &[Field]) {
        (**self).print(fields)
    }
}

impl<L: SqlLogger + ?Sized> SqlLogger for Box<L> {
    fn log(&self, event: &SqlEvent) {
        (**self).log(event)
    }

    fn print(&self, fields: &[Field]) {
        (**self).print(fields)
    }
}

impl<L: SqlLogger + ?Sized> SqlLogger for Arc<L> {
    fn log(&self, event: &SqlEvent) {
        (**self).log(event)
    }

    fn print(&self, fields: &[Field]) {
        (**self).print(fields)
    }
}

/// Drops every event. Use it to silence an access layer's log stream entirely.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentLogger;

impl SilentLogger {
    /// Create a new silent logger.
    pub fn new() -> Self {
        SilentLogger
    }
}

impl SqlLogger for SilentLogger {
    fn log(&self, _event: &SqlEvent) {}

    fn print(&self, _fields: &[Field]) {}
}

/// Emits events as `tracing` records with named fields.
///
/// Without a dispatch the current default subscriber receives the events.
#[derive(Debug, Default, Clone)]
pub struct TracingLogger {
    dispatch: Option<Dispatch>,
}

impl TracingLogger {
    /// Log through the current default subscriber.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log through a specific subscriber.
    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }

    fn emit(event: &SqlEvent) {
        match event {
            SqlEvent::Info { kind, message } => {
                info!(
                    target: "querylog::sql",
                    module = MODULE,
                    kind = %kind,
                    info = %message,
                    "[SQL] {}",
                    message
                );
            }
            SqlEvent::Statement(ev) => {
                let sql = ev.rendered();
                let duration = format_duration(ev.duration);
                info!(
                    target: "querylog::sql",
                    module = MODULE,
                    kind = "sql",
                    source = %ev.source,
                    duration = %duration,
                    statement = %sql,
                    rows = ev.rows,
                    "{}",
                    statement_line(ev, &duration, &sql)
                );
            }
            SqlEvent::Generic { category, message } => {
                info!(
                    target: "querylog::sql",
                    module = MODULE,
                    kind = %category,
                    detail = %message,
                    "[SQL] [{}] {}",
                    category,
                    message
                );
            }
        }
    }
}

impl SqlLogger for TracingLogger {
    fn log(&self, event: &SqlEvent) {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || Self::emit(event)),
            None => Self::emit(event),
        }
    }
}

/// Writes one preformatted line per event.
#[derive(Debug)]
pub struct PlainLogger {
    sink: LineSink,
}

impl PlainLogger {
    /// Write through `sink`.
    pub fn new(sink: LineSink) -> Self {
        Self { sink }
    }

    /// Write to standard error with timestamps.
    pub fn stderr() -> Self {
        Self::new(LineSink::stderr())
    }
}

impl SqlLogger for PlainLogger {
    fn log(&self, event: &SqlEvent) {
        let line = match event {
            SqlEvent::Info { message, .. } => format!("[SQL] {}", message),
            SqlEvent::Statement(ev) => {
                statement_line(ev, &format_duration(ev.duration), &ev.rendered())
            }
            SqlEvent::Generic { message, .. } => format!("[SQL] {}", message),
        };
        self.sink.write_line(&line);
    }
}

/// Pick the SQL emitter described by `config`.
///
/// A disabled config yields a [`SilentLogger`]. `sink` is only used by the
/// plain format.
pub fn logger_from_config(config: &LogConfig, sink: LineSink) -> Result<Box<dyn SqlLogger>> {
    if !config.enabled {
        return Ok(Box::new(SilentLogger::new()));
    }
    let logger: Box<dyn SqlLogger> = match config.log_format()? {
        LogFormat::Structured => Box::new(TracingLogger::new()),
        LogFormat::Plain => Box::new(PlainLogger::new(sink)),
    };
    Ok(logger)
}

fn statement_line(ev: &StatementEvent, duration: &str, sql: &str) -> String {
    format!(
        "[SQL] #: {:4} | {:>12} | {} | {}",
        ev.rows, duration, sql, ev.source
    )
}
