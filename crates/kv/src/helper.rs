//! Bulk helpers over a single connection
//!
//! Each helper issues one command per element, sequentially, and keeps going
//! past individual failures. Only the first failure is kept; the counts in
//! [`BulkOutcome`] tell the caller how much was applied.
//!
//! Input lists of mismatched length are rejected before any command is sent.

use std::panic::Location;

use querylog_core::{Error, Result};

use crate::arg::Arg;
use crate::connection::Connection;
use crate::reply::Reply;

/// Result of a bulk operation.
///
/// `applied <= total` always holds.
#[derive(Debug)]
pub struct BulkOutcome {
    /// Items attempted
    pub total: usize,
    /// Items successfully applied
    pub applied: usize,
    /// First per-item error, in iteration order
    pub first_error: Option<Error>,
}

impl BulkOutcome {
    fn new(total: usize) -> Self {
        Self {
            total,
            applied: 0,
            first_error: None,
        }
    }

    fn record_error(&mut self, e: Error) {
        if self.first_error.is_none() {
            self.first_error = Some(e);
        }
    }

    /// Whether every item was applied without error.
    pub fn is_complete(&self) -> bool {
        self.applied == self.total && self.first_error.is_none()
    }
}

/// Bulk operations layered over a connection.
///
/// Commands go through [`Connection::execute_at`] with the location that
/// called the helper, so a logging connection reports the application's
/// call site rather than this module.
#[derive(Debug)]
pub struct Helper<C> {
    conn: C,
}

impl<C: Connection> Helper<C> {
    /// Wrap `conn`.
    pub fn with_conn(conn: C) -> Self {
        Self { conn }
    }

    /// The wrapped connection.
    pub fn conn(&self) -> &C {
        &self.conn
    }

    /// The wrapped connection, mutably.
    pub fn conn_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Unwrap, returning the connection.
    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Delete every key matching `pattern`: `KEYS pattern`, then one `DEL` per key.
    ///
    /// `applied` counts keys the server reported as deleted; a key that was
    /// already gone counts as attempted but not applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the `KEYS` lookup fails or does not return a key list.
    #[track_caller]
    pub fn delete_all(&mut self, pattern: &str) -> Result<BulkOutcome> {
        let caller = Location::caller();
        let keys = self
            .conn
            .execute_at(caller, "KEYS", &[Arg::from(pattern)])?
            .into_strings()?;

        let mut outcome = BulkOutcome::new(keys.len());
        for key in keys {
            let deleted = self
                .conn
                .execute_at(caller, "DEL", &[Arg::from(key)])
                .and_then(Reply::into_int);
            match deleted {
                Ok(n) if n > 0 => outcome.applied += 1,
                Ok(_) => {}
                Err(e) => outcome.record_error(e),
            }
        }
        Ok(outcome)
    }

    /// `SET key value` for each pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the lists differ in length.
    #[track_caller]
    pub fn set_all<K, V>(&mut self, keys: &[K], values: &[V]) -> Result<BulkOutcome>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let caller = Location::caller();
        check_len("keys and values", keys.len(), values.len())?;

        let mut outcome = BulkOutcome::new(keys.len());
        for (key, value) in keys.iter().zip(values) {
            let args = [Arg::from(key.as_ref()), Arg::from(value.as_ref())];
            match self.conn.execute_at(caller, "SET", &args) {
                Ok(_) => outcome.applied += 1,
                Err(e) => outcome.record_error(e),
            }
        }
        Ok(outcome)
    }

    /// `SET key value EX seconds` for each triple.
    ///
    /// The expiry is sent with the `EX` keyword, not as a bare trailing
    /// integer after the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] unless all three lists have the same length.
    #[track_caller]
    pub fn set_ex_all<K, V>(&mut self, keys: &[K], values: &[V], exs: &[i64]) -> Result<BulkOutcome>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let caller = Location::caller();
        check_len("keys and values", keys.len(), values.len())?;
        check_len("keys and expirations", keys.len(), exs.len())?;

        let mut outcome = BulkOutcome::new(keys.len());
        for ((key, value), ex) in keys.iter().zip(values).zip(exs) {
            let args = [
                Arg::from(key.as_ref()),
                Arg::from(value.as_ref()),
                Arg::from("EX"),
                Arg::from(*ex),
            ];
            match self.conn.execute_at(caller, "SET", &args) {
                Ok(_) => outcome.applied += 1,
                Err(e) => outcome.record_error(e),
            }
        }
        Ok(outcome)
    }
}

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(Error::LengthMismatch {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}
