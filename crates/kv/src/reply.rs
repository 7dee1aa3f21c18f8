//! Replies and reply summaries
//!
//! A [`Reply`] is what a successful command returns. For logging, every reply
//! is reduced to a [`ReplySummary`]: how many items came back and what they
//! were.
//!
//! | Reply | count | type_label |
//! |-------|-------|------------|
//! | `Nil` | 0 | `<nil>` |
//! | `Status("OK")` | 2 | `string (OK)` |
//! | `Bulk(_)` | 1 | `string` |
//! | `Array([])` | 0 | `unknown` |
//! | `Array(items)` | len | label of the first item |
//! | anything else | 1 | label of the reply |

use querylog_core::{Error, Result};

/// Reply to a key-value command.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// No value (missing key)
    Nil,
    /// Short status string, e.g. `OK` or `PONG`
    Status(String),
    /// Integer
    Int(i64),
    /// Binary-safe string
    Bulk(Vec<u8>),
    /// Sequence of replies
    Array(Vec<Reply>),
}

/// Count and type of a reply, as logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplySummary {
    /// Number of items the reply stands for
    pub count: usize,
    /// Type of those items
    pub type_label: &'static str,
}

impl Reply {
    /// Name of the reply variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Reply::Nil => "nil",
            Reply::Status(_) => "status",
            Reply::Int(_) => "integer",
            Reply::Bulk(_) => "bulk",
            Reply::Array(_) => "array",
        }
    }

    /// Label used in summaries: both string encodings read as `string`.
    fn label(&self) -> &'static str {
        match self {
            Reply::Nil => "<nil>",
            Reply::Status(_) | Reply::Bulk(_) => "string",
            Reply::Int(_) => "integer",
            Reply::Array(_) => "array",
        }
    }

    /// Convert an integer reply.
    ///
    /// Bulk strings holding a decimal integer are accepted too.
    pub fn into_int(self) -> Result<i64> {
        match self {
            Reply::Int(i) => Ok(i),
            Reply::Bulk(ref b) => std::str::from_utf8(b)
                .ok()
                .and_then(|s| s.parse().ok())
                .ok_or(Error::WrongType {
                    expected: "integer",
                    actual: "bulk",
                }),
            other => Err(Error::WrongType {
                expected: "integer",
                actual: other.type_name(),
            }),
        }
    }

    /// Convert a status or bulk string reply.
    pub fn into_string(self) -> Result<String> {
        match self {
            Reply::Status(s) => Ok(s),
            Reply::Bulk(b) => Ok(String::from_utf8_lossy(&b).into_owned()),
            other => Err(Error::WrongType {
                expected: "string",
                actual: other.type_name(),
            }),
        }
    }

    /// Convert an array of strings, e.g. the reply to `KEYS`.
    pub fn into_strings(self) -> Result<Vec<String>> {
        match self {
            Reply::Array(items) => items.into_iter().map(Reply::into_string).collect(),
            other => Err(Error::WrongType {
                expected: "array",
                actual: other.type_name(),
            }),
        }
    }
}

/// Summarize a reply for logging.
pub fn summarize(reply: &Reply) -> ReplySummary {
    let (count, type_label) = match reply {
        Reply::Nil => (0, "<nil>"),
        Reply::Status(s) if s == "OK" => (2, "string (OK)"),
        Reply::Bulk(_) => (1, "string"),
        Reply::Array(items) => match items.first() {
            Some(first) => (items.len(), first.label()),
            None => (0, "unknown"),
        },
        scalar => (1, scalar.label()),
    };
    ReplySummary { count, type_label }
}
