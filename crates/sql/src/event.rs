//! Events reported by the relational access layer
//!
//! Access layers typically hand their logger a loosely typed list of values.
//! [`SqlEvent::from_fields`] classifies such a list once; emitters then only
//! ever see the closed [`SqlEvent`] enum.

use querylog_core::format_duration;
use std::fmt;
use std::time::Duration;

use crate::param::Param;
use crate::render::render;

/// One executed statement.
#[derive(Debug, Clone)]
pub struct StatementEvent {
    /// Where the statement was issued from, usually `file:line`
    pub source: String,
    /// Wall-clock execution time
    pub duration: Duration,
    /// Statement template with placeholders
    pub statement: String,
    /// Positional arguments for the placeholders
    pub args: Vec<Param>,
    /// Rows returned or affected
    pub rows: i64,
}

impl StatementEvent {
    /// The statement with its arguments substituted.
    pub fn rendered(&self) -> String {
        render(&self.statement, &self.args)
    }
}

/// Something the access layer wants logged.
#[derive(Debug, Clone)]
pub enum SqlEvent {
    /// Informational message
    Info {
        /// Message kind as reported by the access layer
        kind: String,
        /// Human-readable message
        message: String,
    },
    /// An executed statement
    Statement(StatementEvent),
    /// Anything else, tagged with a category
    Generic {
        /// Category tag
        category: String,
        /// Message body
        message: String,
    },
}

/// A loosely typed value in an access layer's log call.
#[derive(Debug, Clone)]
pub enum Field {
    /// Text
    Text(String),
    /// Integer
    Int(i64),
    /// Elapsed time
    Duration(Duration),
    /// Statement arguments
    Args(Vec<Param>),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text(s) => f.write_str(s),
            Field::Int(i) => write!(f, "{}", i),
            Field::Duration(d) => f.write_str(&format_duration(*d)),
            Field::Args(args) => {
                f.write_str("[")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Field {
    fn from(v: &str) -> Self {
        Field::Text(v.to_string())
    }
}

impl From<String> for Field {
    fn from(v: String) -> Self {
        Field::Text(v)
    }
}

impl From<i64> for Field {
    fn from(v: i64) -> Self {
        Field::Int(v)
    }
}

impl From<i32> for Field {
    fn from(v: i32) -> Self {
        Field::Int(i64::from(v))
    }
}

impl From<Duration> for Field {
    fn from(v: Duration) -> Self {
        Field::Duration(v)
    }
}

impl From<Vec<Param>> for Field {
    fn from(v: Vec<Param>) -> Self {
        Field::Args(v)
    }
}

impl SqlEvent {
    /// Classify a positional field list.
    ///
    /// - zero or one field: nothing to log (`None`)
    /// - two fields: [`SqlEvent::Info`], the second field is the message
    /// - `"sql"`, source, duration, statement, args, rows: [`SqlEvent::Statement`]
    /// - anything else: [`SqlEvent::Generic`] with fields from index 2 joined
    pub fn from_fields(fields: &[Field]) -> Option<SqlEvent> {
        match fields {
            [] | [_] => None,
            [kind, message] => Some(SqlEvent::Info {
                kind: kind.to_string(),
                message: message.to_string(),
            }),
            [Field::Text(tag), source, Field::Duration(duration), Field::Text(statement), Field::Args(args), Field::Int(rows), ..]
                if tag == "sql" =>
            {
                Some(SqlEvent::Statement(StatementEvent {
                    source: source.to_string(),
                    duration: *duration,
                    statement: statement.clone(),
                    args: args.clone(),
                    rows: *rows,
                }))
            }
            [category, _, rest @ ..] => Some(SqlEvent::Generic {
                category: category.to_string(),
                message: join_fields(rest),
            }),
        }
    }
}

/// Concatenate fields, with a space only between two adjacent non-text fields.
fn join_fields(fields: &[Field]) -> String {
    let mut out = String::new();
    let mut prev_text = true;
    for (i, field) in fields.iter().enumerate() {
        let is_text = matches!(field, Field::Text(_));
        if i > 0 && !is_text && !prev_text {
            out.push(' ');
        }
        out.push_str(&field.to_string());
        prev_text = is_text;
    }
    out
}
