//! Error types for bugreportz
//!
//! Every terminal failure ends up as one line on stderr, so messages carry
//! the underlying system error description.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bugreportz
#[derive(Error, Debug)]
pub enum Error {
    // === Connection Errors ===
    #[error("Failed to connect to {endpoint} service after {attempts} attempts: {source}")]
    ConnectionFailed {
        endpoint: String,
        attempts: u32,
        #[source]
        source: io::Error,
    },

    #[error("Cannot set socket timeout: {0}")]
    TimeoutConfigFailed(#[source] io::Error),

    // === Transfer Errors ===
    #[error("Bugreport read terminated abnormally (timed out: {0})")]
    TransferTimedOut(#[source] io::Error),

    #[error("Bugreport read terminated abnormally ({0})")]
    TransferReadFailed(#[source] io::Error),

    #[error("Failed to write data to stdout: read {read}, trying to send {pending} ({source})")]
    TransferWriteFailed {
        read: usize,
        pending: usize,
        #[source]
        source: io::Error,
    },

    // === Configuration Errors ===
    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create a connection failed error for an exhausted retry budget
    pub fn connection_failed(endpoint: &str, attempts: u32, source: io::Error) -> Self {
        Self::ConnectionFailed {
            endpoint: endpoint.to_string(),
            attempts,
            source,
        }
    }

    /// Create a write failure for a chunk that was only partially sent
    pub fn write_failed(read: usize, pending: usize, source: io::Error) -> Self {
        Self::TransferWriteFailed {
            read,
            pending,
            source,
        }
    }
}
