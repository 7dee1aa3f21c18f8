//! Error types for querylog
//!
//! Connections, reply conversions, bulk helpers and configuration loading all
//! report through the single [`Error`] enum below. We use `thiserror` for the
//! `Display` and `Error` implementations.
//!
//! Rendering never produces an error: unrecognized values fall back to their
//! default formatting instead.

use std::io;
use thiserror::Error;

/// Result type alias for querylog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by querylog
#[derive(Debug, Error)]
pub enum Error {
    /// Parallel input lists had different lengths
    #[error("the length of {what} is different: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Which lists were compared (e.g. "keys and values")
        what: &'static str,
        /// Length of the driving list (the keys)
        expected: usize,
        /// Length of the list that disagreed
        actual: usize,
    },

    /// Transport-level failure reported by the wrapped connection
    #[error("connection error: {reason}")]
    Connection {
        /// Description of the failure
        reason: String,
    },

    /// Error reply returned by the key-value server
    #[error("{message}")]
    Server {
        /// Message carried by the error reply
        message: String,
    },

    /// A reply did not have the shape a conversion asked for
    #[error("wrong type: expected {expected}, got {actual}")]
    WrongType {
        /// Expected reply type
        expected: &'static str,
        /// Actual reply type
        actual: &'static str,
    },

    /// Configuration could not be read or was invalid
    #[error("invalid config: {reason}")]
    InvalidConfig {
        /// Description of the problem
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Create a connection error
    pub fn connection(reason: impl Into<String>) -> Self {
        Error::Connection {
            reason: reason.into(),
        }
    }

    /// Create a server error reply
    pub fn server(message: impl Into<String>) -> Self {
        Error::Server {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            reason: reason.into(),
        }
    }
}
