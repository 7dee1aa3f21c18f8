//! Configuration Tests
//!
//! A `querylog.toml` on disk selects the emitters for both adapters.

use crate::common::*;
use querylog::kv::LoggedConnection;
use querylog::sql::{logger_from_config, Field, SqlLogger};
use querylog::{Error, LogConfig, CONFIG_FILE_NAME};
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> LogConfig {
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, content).unwrap();
    LogConfig::from_file(&path).unwrap()
}

#[test]
fn default_file_is_written_once_and_parses() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    LogConfig::write_default_if_missing(&path).unwrap();
    let config = LogConfig::from_file(&path).unwrap();
    assert!(config.enabled);
    assert_eq!(config.format, "structured");

    fs::write(&path, "enabled = false\n").unwrap();
    LogConfig::write_default_if_missing(&path).unwrap();
    assert!(!LogConfig::from_file(&path).unwrap().enabled);
}

#[test]
fn plain_config_drives_both_adapters() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "format = \"plain\"\nsource = false\n");

    let sql_buf = SharedBuf::new();
    let sql = logger_from_config(&config, sql_buf.sink()).unwrap();
    sql.print(&[Field::from("info"), Field::from("connected")]);
    assert_eq!(sql_buf.lines(), vec!["[SQL] connected"]);

    let kv_buf = SharedBuf::new();
    let mut conn = LoggedConnection::from_config(user_store(), &config, kv_buf.sink()).unwrap();
    conn.execute("GET", &["user:1".into()]).unwrap();
    let lines = kv_buf.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with("| GET user:1 | "));
}

#[test]
fn disabled_config_silences_both_adapters() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "enabled = false\nformat = \"plain\"\n");

    let buf = SharedBuf::new();
    let sql = logger_from_config(&config, buf.sink()).unwrap();
    sql.print(&[Field::from("info"), Field::from("connected")]);

    let mut conn = LoggedConnection::from_config(user_store(), &config, buf.sink()).unwrap();
    conn.execute("GET", &["user:1".into()]).unwrap();

    assert!(!conn.is_enabled());
    assert!(buf.contents().is_empty());
}

#[test]
fn structured_config_goes_through_tracing() {
    let dir = TempDir::new().unwrap();
    let config = write_config(&dir, "");

    let unused = SharedBuf::new();
    let out = capture_tracing(|| {
        let sql = logger_from_config(&config, unused.sink()).unwrap();
        sql.print(&[Field::from("info"), Field::from("connected")]);
    });

    assert!(unused.contents().is_empty());
    assert!(out.contents().contains("[SQL] connected"));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(&path, "format = \"xml\"\n").unwrap();

    let err = LogConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { .. }));
    assert!(err.to_string().contains("xml"));
}
