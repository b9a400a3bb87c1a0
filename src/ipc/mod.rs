//! IPC with the collection service
//!
//! Uses Unix domain sockets on Unix/Android and named pipes on Windows
//! via the interprocess crate.

pub mod retry;
pub mod transport;

pub use retry::{connect_with_retry, RetryPolicy};
pub use transport::Channel;
