//! Command logging decorator
//!
//! [`LoggedConnection`] owns the wrapped connection and forwards every
//! [`Connection`] method to it. Only command execution is intercepted: it is
//! timed, and once the reply (or error) is in, a [`CommandRecord`] goes to
//! the configured [`KvLogger`]. Replies and errors are returned unchanged.

use std::panic::Location;
use std::sync::Arc;
use std::time::{Duration, Instant};

use querylog_core::{format_duration, Error, LineSink, LogConfig, LogFormat, Result};
use tracing::{error, info, Dispatch};

use crate::arg::Arg;
use crate::command::render_command;
use crate::connection::Connection;
use crate::reply::{summarize, Reply, ReplySummary};

/// Module tag attached to every key-value record.
pub const MODULE: &str = "redis";

/// How an executed command ended.
#[derive(Debug, Clone, Copy)]
pub enum CommandOutcome<'a> {
    /// The server replied
    Replied(ReplySummary),
    /// The command failed
    Failed(&'a Error),
}

/// One executed command, ready to be logged.
#[derive(Debug, Clone)]
pub struct CommandRecord<'a> {
    /// Command line, e.g. `SET k v`
    pub command: String,
    /// Caller location as `file:line`, empty when source recording is off
    pub source: String,
    /// Wall-clock execution time
    pub duration: Duration,
    /// Reply summary or error
    pub outcome: CommandOutcome<'a>,
}

/// Capability to emit a [`CommandRecord`].
pub trait KvLogger: Send + Sync {
    /// Emit one record.
    fn log(&self, record: &CommandRecord<'_>);
}

impl<L: KvLogger + ?Sized> KvLogger for &L {
    fn log(&self, record: &CommandRecord<'_>) {
        (**self).log(record)
    }
}

impl<L: KvLogger + ?Sized> KvLogger for Box<L> {
    fn log(&self, record: &CommandRecord<'_>) {
        (**self).log(record)
    }
}

impl<L: KvLogger + ?Sized> KvLogger for Arc<L> {
    fn log(&self, record: &CommandRecord<'_>) {
        (**self).log(record)
    }
}

/// Emits records as `tracing` events with named fields, target `querylog::kv`.
///
/// Failures are logged at error level, replies at info level.
#[derive(Debug, Default, Clone)]
pub struct TracingKvLogger {
    dispatch: Option<Dispatch>,
}

impl TracingKvLogger {
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

    fn emit(record: &CommandRecord<'_>) {
        match record.outcome {
            CommandOutcome::Failed(e) => {
                error!(
                    target: "querylog::kv",
                    module = MODULE,
                    command = %record.command,
                    error = %e,
                    source = %record.source,
                    "{}",
                    failure_line(record, e)
                );
            }
            CommandOutcome::Replied(summary) => {
                let duration = format_duration(record.duration);
                info!(
                    target: "querylog::kv",
                    module = MODULE,
                    command = %record.command,
                    count = summary.count,
                    reply_type = summary.type_label,
                    duration = %duration,
                    source = %record.source,
                    "{}",
                    reply_line(record, &summary, &duration)
                );
            }
        }
    }
}

impl KvLogger for TracingKvLogger {
    fn log(&self, record: &CommandRecord<'_>) {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, || Self::emit(record)),
            None => Self::emit(record),
        }
    }
}

/// Writes one preformatted line per record.
#[derive(Debug)]
pub struct PlainKvLogger {
    sink: LineSink,
}

impl PlainKvLogger {
    /// Write through `sink`.
    pub fn new(sink: LineSink) -> Self {
        Self { sink }
    }

    /// Write to standard error with timestamps.
    pub fn stderr() -> Self {
        Self::new(LineSink::stderr())
    }
}

impl KvLogger for PlainKvLogger {
    fn log(&self, record: &CommandRecord<'_>) {
        let line = match record.outcome {
            CommandOutcome::Failed(e) => failure_line(record, e),
            CommandOutcome::Replied(summary) => {
                reply_line(record, &summary, &format_duration(record.duration))
            }
        };
        self.sink.write_line(&line);
    }
}

fn reply_line(record: &CommandRecord<'_>, summary: &ReplySummary, duration: &str) -> String {
    format!(
        "[Redis] #: {:3} | {:>12} | {:>15} | {} | {}",
        summary.count, duration, summary.type_label, record.command, record.source
    )
}

fn failure_line(record: &CommandRecord<'_>, e: &Error) -> String {
    format!("[Redis] {} | {} | {}", e, record.command, record.source)
}

/// Pick the key-value emitter described by `config`.
///
/// Returns `None` when logging is disabled. `sink` is only used by the plain
/// format.
pub fn logger_from_config(config: &LogConfig, sink: LineSink) -> Result<Option<Box<dyn KvLogger>>> {
    if !config.enabled {
        return Ok(None);
    }
    let logger: Box<dyn KvLogger> = match config.log_format()? {
        LogFormat::Structured => Box::new(TracingKvLogger::new()),
        LogFormat::Plain => Box::new(PlainKvLogger::new(sink)),
    };
    Ok(Some(logger))
}

/// A [`Connection`] that logs every executed command.
///
/// # Example
///
/// ```ignore
/// use querylog_kv::{Connection, LoggedConnection, TracingKvLogger};
///
/// let mut conn = LoggedConnection::new(raw, TracingKvLogger::new(), true);
/// conn.execute("SET", &["greeting".into(), "hello".into()])?;
/// ```
pub struct LoggedConnection<C, L> {
    conn: C,
    logger: L,
    enabled: bool,
    source: bool,
}

impl<C: Connection, L: KvLogger> LoggedConnection<C, L> {
    /// Wrap `conn`, logging through `logger` when `enabled`.
    pub fn new(conn: C, logger: L, enabled: bool) -> Self {
        Self {
            conn,
            logger,
            enabled,
            source: true,
        }
    }

    /// Record (or stop recording) the caller's location on each record.
    pub fn with_source(mut self, source: bool) -> Self {
        self.source = source;
        self
    }

    /// Turn logging on or off.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether commands are currently logged.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The wrapped connection.
    pub fn get_ref(&self) -> &C {
        &self.conn
    }

    /// The wrapped connection, mutably.
    pub fn get_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// The logger records go to.
    pub fn logger(&self) -> &L {
        &self.logger
    }

    /// Unwrap, returning the wrapped connection.
    pub fn into_inner(self) -> C {
        self.conn
    }

    fn run(
        &mut self,
        caller: &'static Location<'static>,
        command: &str,
        args: &[Arg],
    ) -> Result<Reply> {
        let start = Instant::now();
        let result = self.conn.execute_at(caller, command, args);
        let duration = start.elapsed();

        if self.enabled {
            self.record(caller, command, args, duration, &result);
        }
        result
    }

    fn record(
        &self,
        caller: &'static Location<'static>,
        command: &str,
        args: &[Arg],
        duration: Duration,
        result: &Result<Reply>,
    ) {
        let command = render_command(command, args);
        let outcome = match result {
            Err(e) => CommandOutcome::Failed(e),
            Ok(_) if command.is_empty() => return,
            Ok(reply) => CommandOutcome::Replied(summarize(reply)),
        };
        let source = if self.source {
            format!("{}:{}", caller.file(), caller.line())
        } else {
            String::new()
        };

        self.logger.log(&CommandRecord {
            command,
            source,
            duration,
            outcome,
        });
    }
}

impl<C: Connection> LoggedConnection<C, Box<dyn KvLogger>> {
    /// Wrap `conn` with the emitter described by `config`.
    ///
    /// A disabled config still wraps the connection, with logging off.
    pub fn from_config(conn: C, config: &LogConfig, sink: LineSink) -> Result<Self> {
        let (logger, enabled): (Box<dyn KvLogger>, bool) = match logger_from_config(config, sink)? {
            Some(logger) => (logger, true),
            None => (Box::new(TracingKvLogger::new()), false),
        };
        Ok(Self::new(conn, logger, enabled).with_source(config.source))
    }
}

impl<C: Connection, L: KvLogger> Connection for LoggedConnection<C, L> {
    #[track_caller]
    fn execute(&mut self, command: &str, args: &[Arg]) -> Result<Reply> {
        self.run(Location::caller(), command, args)
    }

    fn execute_at(
        &mut self,
        source: &'static Location<'static>,
        command: &str,
        args: &[Arg],
    ) -> Result<Reply> {
        self.run(source, command, args)
    }

    fn send(&mut self, command: &str, args: &[Arg]) -> Result<()> {
        self.conn.send(command, args)
    }

    fn flush(&mut self) -> Result<()> {
        self.conn.flush()
    }

    fn receive(&mut self) -> Result<Reply> {
        self.conn.receive()
    }

    fn close(&mut self) -> Result<()> {
        self.conn.close()
    }
}

impl<C: std::fmt::Debug, L> std::fmt::Debug for LoggedConnection<C, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggedConnection")
            .field("conn", &self.conn)
            .field("enabled", &self.enabled)
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
