//! Plain-text line destination
//!
//! A [`LineSink`] owns any `Write + Send` destination behind a mutex and
//! writes one complete line per call, so records from different threads never
//! interleave mid-line. Write failures are swallowed: a broken log destination
//! must not fail the database or key-value call being logged.

use chrono::Local;
use parking_lot::Mutex;
use std::io::{self, Write};

/// Timestamp layout used when [`LineSink::with_timestamps`] is enabled.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Mutex-guarded line writer used by the plain-text emitters.
pub struct LineSink {
    out: Mutex<Box<dyn Write + Send>>,
    prefix: String,
    timestamps: bool,
}

impl LineSink {
    /// Create a sink writing to `out` with no prefix and no timestamps.
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
            prefix: String::new(),
            timestamps: false,
        }
    }

    /// Create a sink writing to standard error with timestamps enabled.
    pub fn stderr() -> Self {
        Self::new(io::stderr()).with_timestamps(true)
    }

    /// Prepend `prefix` to every line.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Prepend the local time to every line.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// Write one line. A trailing newline is added when missing.
    pub fn write_line(&self, line: &str) {
        let mut buf = String::with_capacity(self.prefix.len() + line.len() + 21);
        buf.push_str(&self.prefix);
        if self.timestamps {
            buf.push_str(&Local::now().format(TIMESTAMP_FORMAT).to_string());
            buf.push(' ');
        }
        buf.push_str(line);
        if !buf.ends_with('\n') {
            buf.push('\n');
        }

        let mut out = self.out.lock();
        let _ = out.write_all(buf.as_bytes());
        let _ = out.flush();
    }
}

impl std::fmt::Debug for LineSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineSink")
            .field("prefix", &self.prefix)
            .field("timestamps", &self.timestamps)
            .finish_non_exhaustive()
    }
}
