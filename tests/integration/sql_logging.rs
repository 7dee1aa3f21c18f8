//! SQL Logging Tests
//!
//! Drives each SQL emitter the way an access layer does: with positional
//! field lists, and through `trace_statement`.

use crate::common::*;
use chrono::{TimeZone, Utc};
use querylog::sql::{
    render, trace_statement, DriverValue, Field, Param, PlainLogger, SilentLogger, SqlLogger,
    TracingLogger, Valuer, ValuerError,
};
use std::time::Duration;

#[derive(Debug)]
struct UserId(Option<u64>);

impl Valuer for UserId {
    fn value(&self) -> Result<Option<DriverValue>, ValuerError> {
        Ok(self.0.map(|id| DriverValue::Text(format!("usr_{}", id))))
    }
}

fn sql_fields() -> Vec<Field> {
    let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    vec![
        Field::from("sql"),
        Field::from("src/users.rs:27"),
        Field::from(Duration::from_millis(12)),
        Field::from("INSERT INTO users (id, name, avatar, created_at, referrer) VALUES ($1, $2, $3, $4, $5)"),
        Field::from(vec![
            Param::valuer(UserId(Some(7))),
            Param::from("ann"),
            Param::from(b"png".to_vec()),
            Param::from(created),
            Param::valuer(UserId(None)),
        ]),
        Field::from(1i64),
    ]
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn every_argument_shape_renders() {
    let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    let nickname: Option<&str> = None;
    let sql = render(
        "UPDATE users SET id = ?, name = ?, avatar = ?, created_at = ?, referrer = ?, nickname = ? WHERE age > ?",
        &[
            Param::valuer(UserId(Some(7))),
            Param::from("ann"),
            Param::from(b"png".as_slice()),
            Param::from(created),
            Param::valuer(UserId(None)),
            Param::from(nickname),
            Param::from(&30i32),
        ],
    );
    assert_eq!(
        sql,
        "UPDATE users SET id = 'usr_7', name = 'ann', avatar = 'png', \
         created_at = '2023-01-01T00:00:00Z', referrer = NULL, nickname = '<nil>' WHERE age > '30'"
    );
}

// ============================================================================
// Plain emitter
// ============================================================================

#[test]
fn plain_emitter_renders_statement_line() {
    let buf = SharedBuf::new();
    let logger = PlainLogger::new(buf.sink());

    logger.print(&sql_fields());

    assert_eq!(
        buf.lines(),
        vec![
            "[SQL] #:    1 |         12ms | INSERT INTO users (id, name, avatar, created_at, referrer) \
             VALUES ('usr_7', 'ann', 'png', '2023-01-01T00:00:00Z', NULL) | src/users.rs:27"
        ]
    );
}

#[test]
fn plain_emitter_handles_every_shape() {
    let buf = SharedBuf::new();
    let logger = PlainLogger::new(buf.sink());

    logger.print(&[]);
    logger.print(&[Field::from("only")]);
    logger.print(&[Field::from("info"), Field::from("migrations applied")]);
    logger.print(&[
        Field::from("log"),
        Field::from("src/db.rs:3"),
        Field::from("slow query took "),
        Field::from(Duration::from_secs(2)),
    ]);

    assert_eq!(
        buf.lines(),
        vec!["[SQL] migrations applied", "[SQL] slow query took 2s"]
    );
}

// ============================================================================
// Structured emitter
// ============================================================================

#[test]
fn structured_emitter_records_named_fields() {
    let out = capture_tracing(|| {
        let logger = TracingLogger::new();
        logger.print(&sql_fields());
        logger.print(&[Field::from("info"), Field::from("pool ready")]);
    });

    let lines: Vec<String> = out.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("querylog::sql"));
    assert!(lines[0].contains("source=src/users.rs:27"));
    assert!(lines[0].contains("duration=12ms"));
    assert!(lines[0].contains("rows=1"));
    assert!(lines[0].contains("'usr_7', 'ann'"));
    assert!(lines[1].contains("[SQL] pool ready"));
    assert!(lines[1].contains("kind=info"));
}

#[test]
fn structured_emitter_as_json() {
    let out = capture_tracing_json(|| {
        TracingLogger::new().print(&sql_fields());
    });

    let line = out.lines().pop().expect("one JSON line");
    let json: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(json["module"], "sql");
    assert_eq!(json["kind"], "sql");
    assert_eq!(json["rows"], 1);
    assert_eq!(json["source"], "src/users.rs:27");
    assert!(json["statement"]
        .as_str()
        .unwrap()
        .ends_with("VALUES ('usr_7', 'ann', 'png', '2023-01-01T00:00:00Z', NULL)"));
}

// ============================================================================
// Silent emitter
// ============================================================================

#[test]
fn silent_emitter_produces_nothing() {
    let out = capture_tracing(|| {
        let logger = SilentLogger::new();
        logger.print(&sql_fields());
        logger.print(&[Field::from("info"), Field::from("x")]);
        logger.print(&[]);
    });
    assert!(out.contents().is_empty());
}

// ============================================================================
// trace_statement
// ============================================================================

#[test]
fn trace_statement_reports_this_file_as_source() {
    let buf = SharedBuf::new();
    let logger = PlainLogger::new(buf.sink());

    let rows = trace_statement(
        &logger,
        "DELETE FROM sessions WHERE user_id = ?",
        &[Param::from(9i64)],
        || Ok::<u64, String>(4),
    )
    .unwrap();
    assert_eq!(rows, 4);

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("[SQL] #:    4 | "));
    assert!(lines[0].contains("DELETE FROM sessions WHERE user_id = '9'"));
    assert!(lines[0].contains("sql_logging.rs:"), "line was {}", lines[0]);
}

#[test]
fn trace_statement_works_through_trait_objects() {
    let buf = SharedBuf::new();
    let logger: Box<dyn SqlLogger> = Box::new(PlainLogger::new(buf.sink()));

    let err = trace_statement(logger.as_ref(), "SELECT 1", &[], || Err::<u64, _>("timeout"))
        .unwrap_err();
    assert_eq!(err, "timeout");
    assert!(buf.lines()[0].starts_with("[SQL] timeout | SELECT 1 | "));
}
