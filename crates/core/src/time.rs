//! Time rendering shared by the SQL and key-value renderers

use chrono::{DateTime, SecondsFormat, TimeZone};
use std::time::Duration;

/// Format a timestamp as RFC 3339 with whole seconds.
///
/// UTC renders with a `Z` suffix, other offsets as `+HH:MM`.
pub fn format_timestamp<Tz>(ts: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Format an elapsed duration for log lines, e.g. `1.5ms` or `12.003µs`.
pub fn format_duration(elapsed: Duration) -> String {
    format!("{:?}", elapsed)
}
