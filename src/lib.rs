//! bugreportz - bug report relay
//!
//! Starts the bug report collection service, connects to its local socket
//! and relays the generated report to stdout unchanged.

pub mod cli;
pub mod commands;
pub mod common;
pub mod ipc;
pub mod relay;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use relay::{RelaySettings, RelaySummary};
