//! Timed statement execution

use std::fmt::Display;
use std::panic::Location;
use std::time::Instant;

use crate::event::{SqlEvent, StatementEvent};
use crate::logger::SqlLogger;
use crate::param::Param;
use crate::render::render;

/// Run `execute`, timing it, and log the statement it ran.
///
/// `execute` returns the number of rows returned or affected. On success a
/// [`SqlEvent::Statement`] is logged; on failure a [`SqlEvent::Generic`] with
/// category `error`. The result of `execute` is returned unchanged either way.
///
/// The source recorded is the location that called `trace_statement`.
///
/// # Example
///
/// ```ignore
/// let rows = trace_statement(&logger, "DELETE FROM sessions WHERE user_id = ?", &[user_id.into()], || {
///     conn.execute("DELETE FROM sessions WHERE user_id = ?", [user_id])
/// })?;
/// ```
#[track_caller]
pub fn trace_statement<L, E, F>(logger: &L, statement: &str, args: &[Param], execute: F) -> Result<u64, E>
where
    L: SqlLogger + ?Sized,
    E: Display,
    F: FnOnce() -> Result<u64, E>,
{
    let caller = Location::caller();
    let source = format!("{}:{}", caller.file(), caller.line());

    let start = Instant::now();
    let result = execute();
    let duration = start.elapsed();

    match &result {
        Ok(rows) => logger.log(&SqlEvent::Statement(StatementEvent {
            source,
            duration,
            statement: statement.to_string(),
            args: args.to_vec(),
            rows: i64::try_from(*rows).unwrap_or(i64::MAX),
        })),
        Err(e) => logger.log(&SqlEvent::Generic {
            category: "error".to_string(),
            message: format!("{} | {} | {}", e, render(statement, args), source),
        }),
    }

    result
}
