//! Statement argument values
//!
//! Access layers hand over arguments of arbitrary type. They are classified
//! once, when converted into a [`Param`], into the closed set of shapes the
//! renderer knows how to print:
//!
//! - timestamps (rendered as RFC 3339)
//! - raw bytes (rendered as their decoded text)
//! - value-producing wrappers ([`Valuer`], rendered as what they produce or `NULL`)
//! - everything else (rendered through `Display`)
//!
//! A reference to an argument is resolved by the `From` impls: `&T` converts
//! like `T`, and `None` (a reference to nothing) becomes [`Param::Nil`].

use chrono::{DateTime, FixedOffset, Local, Utc};
use querylog_core::format_timestamp;
use std::fmt;
use std::sync::Arc;

/// Failure reported by a [`Valuer`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ValuerError(String);

impl ValuerError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        ValuerError(message.into())
    }
}

/// A value produced by a [`Valuer`].
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Point in time
    Timestamp(DateTime<FixedOffset>),
}

impl fmt::Display for DriverValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverValue::Bool(b) => write!(f, "{}", b),
            DriverValue::Int(i) => write!(f, "{}", i),
            DriverValue::Float(x) => write!(f, "{}", x),
            DriverValue::Text(s) => f.write_str(s),
            DriverValue::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            DriverValue::Timestamp(t) => f.write_str(&format_timestamp(t)),
        }
    }
}

/// A type that knows how to produce its own database value.
///
/// Returning `Ok(None)` means the value is SQL `NULL`.
pub trait Valuer: fmt::Debug + Send + Sync {
    /// Produce the underlying value.
    fn value(&self) -> Result<Option<DriverValue>, ValuerError>;
}

/// A statement argument, classified for rendering.
#[derive(Debug, Clone)]
pub enum Param {
    /// No value (a nil reference)
    Nil,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point
    Float(f64),
    /// Text
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Point in time
    Timestamp(DateTime<FixedOffset>),
    /// Value-producing wrapper
    Valuer(Arc<dyn Valuer>),
}

impl Param {
    /// Wrap a [`Valuer`] implementation.
    pub fn valuer<V: Valuer + 'static>(v: V) -> Self {
        Param::Valuer(Arc::new(v))
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Param::Nil => "nil",
            Param::Bool(_) => "bool",
            Param::Int(_) => "int",
            Param::UInt(_) => "uint",
            Param::Float(_) => "float",
            Param::Text(_) => "text",
            Param::Bytes(_) => "bytes",
            Param::Timestamp(_) => "timestamp",
            Param::Valuer(_) => "valuer",
        }
    }
}

/// Default representation, used when no type-specific rule applies.
impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Nil => f.write_str("<nil>"),
            Param::Bool(b) => write!(f, "{}", b),
            Param::Int(i) => write!(f, "{}", i),
            Param::UInt(u) => write!(f, "{}", u),
            Param::Float(x) => write!(f, "{}", x),
            Param::Text(s) => f.write_str(s),
            Param::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
            Param::Timestamp(t) => f.write_str(&format_timestamp(t)),
            Param::Valuer(v) => write!(f, "{:?}", v),
        }
    }
}

// ============================================================================
// From implementations
// ============================================================================

macro_rules! param_from_int {
    ($variant:ident, $wide:ty, $($t:ty),*) => {
        $(
            impl From<$t> for Param {
                fn from(v: $t) -> Self {
                    Param::$variant(<$wide>::from(v))
                }
            }
        )*
    };
}

param_from_int!(Int, i64, i8, i16, i32, i64);
param_from_int!(UInt, u64, u8, u16, u32, u64);

impl From<isize> for Param {
    fn from(v: isize) -> Self {
        Param::Int(v as i64)
    }
}

impl From<usize> for Param {
    fn from(v: usize) -> Self {
        Param::UInt(v as u64)
    }
}

impl From<bool> for Param {
    fn from(v: bool) -> Self {
        Param::Bool(v)
    }
}

impl From<f32> for Param {
    fn from(v: f32) -> Self {
        Param::Float(f64::from(v))
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Float(v)
    }
}

impl From<&str> for Param {
    fn from(v: &str) -> Self {
        Param::Text(v.to_string())
    }
}

impl From<String> for Param {
    fn from(v: String) -> Self {
        Param::Text(v)
    }
}

impl From<&[u8]> for Param {
    fn from(v: &[u8]) -> Self {
        Param::Bytes(v.to_vec())
    }
}

impl From<Vec<u8>> for Param {
    fn from(v: Vec<u8>) -> Self {
        Param::Bytes(v)
    }
}

impl From<DateTime<FixedOffset>> for Param {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Param::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Param {
    fn from(v: DateTime<Utc>) -> Self {
        Param::Timestamp(v.into())
    }
}

impl From<DateTime<Local>> for Param {
    fn from(v: DateTime<Local>) -> Self {
        Param::Timestamp(v.into())
    }
}

impl From<DriverValue> for Param {
    fn from(v: DriverValue) -> Self {
        match v {
            DriverValue::Bool(b) => Param::Bool(b),
            DriverValue::Int(i) => Param::Int(i),
            DriverValue::Float(x) => Param::Float(x),
            DriverValue::Text(s) => Param::Text(s),
            DriverValue::Bytes(b) => Param::Bytes(b),
            DriverValue::Timestamp(t) => Param::Timestamp(t),
        }
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Param::Nil,
        }
    }
}

impl<T: Clone + Into<Param>> From<&T> for Param {
    fn from(v: &T) -> Self {
        v.clone().into()
    }
}
