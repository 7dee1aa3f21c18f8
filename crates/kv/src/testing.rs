//! Testing utilities for code built on [`Connection`]
//!
//! [`ScriptedConnection`] answers every command from a closure and records
//! what it was asked to do, so tests can assert both on results and on the
//! exact commands issued.
//!
//! ```ignore
//! use querylog_kv::testing::ScriptedConnection;
//! use querylog_kv::Reply;
//!
//! let mut conn = ScriptedConnection::new(|cmd, _args| match cmd {
//!     "GET" => Ok(Reply::Bulk(b"v".to_vec())),
//!     _ => Ok(Reply::Status("OK".into())),
//! });
//! ```

use std::collections::VecDeque;

use querylog_core::{Error, Result};

use crate::arg::Arg;
use crate::command::render_command;
use crate::connection::Connection;
use crate::reply::Reply;

type Handler = Box<dyn FnMut(&str, &[Arg]) -> Result<Reply> + Send>;

/// A command the connection received.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// Command name
    pub command: String,
    /// Arguments
    pub args: Vec<Arg>,
}

impl Call {
    /// The call rendered as one line, e.g. `SET k v`.
    pub fn line(&self) -> String {
        render_command(&self.command, &self.args)
    }
}

/// In-process connection driven by a closure.
pub struct ScriptedConnection {
    handler: Handler,
    calls: Vec<Call>,
    pending: VecDeque<Call>,
    closed: bool,
}

impl ScriptedConnection {
    /// Answer every command with `handler`.
    pub fn new<F>(handler: F) -> Self
    where
        F: FnMut(&str, &[Arg]) -> Result<Reply> + Send + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Vec::new(),
            pending: VecDeque::new(),
            closed: false,
        }
    }

    /// Answer every command with `OK`.
    pub fn ok() -> Self {
        Self::new(|_, _| Ok(Reply::Status("OK".to_string())))
    }

    /// Every command executed or sent so far, in order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Every command rendered as a line.
    pub fn lines(&self) -> Vec<String> {
        self.calls.iter().map(Call::line).collect()
    }

    /// Whether [`Connection::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::connection("connection closed"));
        }
        Ok(())
    }
}

impl Connection for ScriptedConnection {
    fn execute(&mut self, command: &str, args: &[Arg]) -> Result<Reply> {
        self.check_open()?;
        self.calls.push(Call {
            command: command.to_string(),
            args: args.to_vec(),
        });
        (self.handler)(command, args)
    }

    fn send(&mut self, command: &str, args: &[Arg]) -> Result<()> {
        self.check_open()?;
        let call = Call {
            command: command.to_string(),
            args: args.to_vec(),
        };
        self.calls.push(call.clone());
        self.pending.push_back(call);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.check_open()
    }

    fn receive(&mut self) -> Result<Reply> {
        self.check_open()?;
        let call = self
            .pending
            .pop_front()
            .ok_or_else(|| Error::connection("no pending reply"))?;
        (self.handler)(&call.command, &call.args)
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

impl std::fmt::Debug for ScriptedConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedConnection")
            .field("calls", &self.calls)
            .field("pending", &self.pending.len())
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}
