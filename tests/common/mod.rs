//! Shared test utilities for the integration suite.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

pub use querylog::kv::testing::ScriptedConnection;
pub use querylog::kv::{Arg, Connection, Reply};
pub use querylog::LineSink;

// ============================================================================
// SharedBuf - in-memory log destination
// ============================================================================

/// Cloneable in-memory writer; every clone appends to the same buffer.
#[derive(Clone, Default)]
pub struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    pub fn new() -> Self {
        Self::default()
    }

    /// A plain-text sink writing into this buffer, without timestamps.
    pub fn sink(&self) -> LineSink {
        LineSink::new(self.clone())
    }

    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().clone()).expect("log output is UTF-8")
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ============================================================================
// Captured tracing output
// ============================================================================

/// Run `f` with a fmt subscriber writing into the returned buffer.
pub fn capture_tracing<F: FnOnce()>(f: F) -> SharedBuf {
    let buf = SharedBuf::new();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf
}

/// Run `f` with a JSON subscriber writing into the returned buffer.
pub fn capture_tracing_json<F: FnOnce()>(f: F) -> SharedBuf {
    let buf = SharedBuf::new();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    buf
}

// ============================================================================
// Scripted servers
// ============================================================================

/// A server holding `user:1`..`user:3`, where `user:2` has already expired.
pub fn user_store() -> ScriptedConnection {
    ScriptedConnection::new(|cmd, args| match cmd {
        "KEYS" => Ok(Reply::Array(vec![
            Reply::Bulk(b"user:1".to_vec()),
            Reply::Bulk(b"user:2".to_vec()),
            Reply::Bulk(b"user:3".to_vec()),
        ])),
        "DEL" if args.first() == Some(&Arg::from("user:2")) => Ok(Reply::Int(0)),
        "DEL" => Ok(Reply::Int(1)),
        "GET" => Ok(Reply::Bulk(b"alice".to_vec())),
        "SET" if args.first() == Some(&Arg::from("readonly")) => Err(querylog::Error::server(
            "READONLY You can't write against a read only replica.",
        )),
        _ => Ok(Reply::Status("OK".to_string())),
    })
}
