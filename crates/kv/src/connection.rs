//! The key-value connection capability

use std::panic::Location;

use querylog_core::Result;

use crate::arg::Arg;
use crate::reply::Reply;

/// A connection to a key-value server.
///
/// Connections are not expected to be safe for concurrent use; every method
/// takes `&mut self`.
pub trait Connection {
    /// Execute a command and wait for its reply.
    ///
    /// Error replies from the server come back as [`querylog_core::Error::Server`].
    /// Implementations see the location of the code that called `execute`
    /// through [`Location::caller`], including calls made through `&mut C`,
    /// `Box<C>` and `Box<dyn Connection>`.
    #[track_caller]
    fn execute(&mut self, command: &str, args: &[Arg]) -> Result<Reply>;

    /// Execute a command on behalf of the code at `source`.
    ///
    /// Wrappers that call [`Connection::execute`] internally use this to keep
    /// their own caller visible to logging connections. Connections that
    /// don't log ignore `source`.
    fn execute_at(
        &mut self,
        source: &'static Location<'static>,
        command: &str,
        args: &[Arg],
    ) -> Result<Reply> {
        let _ = source;
        self.execute(command, args)
    }

    /// Queue a command without waiting for its reply.
    fn send(&mut self, command: &str, args: &[Arg]) -> Result<()>;

    /// Push queued commands to the server.
    fn flush(&mut self) -> Result<()>;

    /// Read the reply to the oldest queued command.
    fn receive(&mut self) -> Result<Reply>;

    /// Close the connection.
    fn close(&mut self) -> Result<()>;
}

impl<C: Connection + ?Sized> Connection for &mut C {
    #[track_caller]
    fn execute(&mut self, command: &str, args: &[Arg]) -> Result<Reply> {
        (**self).execute(command, args)
    }

    fn execute_at(
        &mut self,
        source: &'static Location<'static>,
        command: &str,
        args: &[Arg],
    ) -> Result<Reply> {
        (**self).execute_at(source, command, args)
    }

    fn send(&mut self, command: &str, args: &[Arg]) -> Result<()> {
        (**self).send(command, args)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn receive(&mut self) -> Result<Reply> {
        (**self).receive()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    #[track_caller]
    fn execute(&mut self, command: &str, args: &[Arg]) -> Result<Reply> {
        (**self).execute(command, args)
    }

    fn execute_at(
        &mut self,
        source: &'static Location<'static>,
        command: &str,
        args: &[Arg],
    ) -> Result<Reply> {
        (**self).execute_at(source, command, args)
    }

    fn send(&mut self, command: &str, args: &[Arg]) -> Result<()> {
        (**self).send(command, args)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn receive(&mut self) -> Result<Reply> {
        (**self).receive()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
