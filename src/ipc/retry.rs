//! Polling connect for services that are still starting up
//!
//! The service socket does not exist until the service has started, so the
//! connect is retried at a fixed cadence. No backoff and no jitter.

use std::future::Future;
use std::io;
use std::time::Duration;

use crate::common::config::RetryConfig;
use crate::common::{Error, Result};

/// Bounds for the connect loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of connection attempts, at least 1
    pub max_attempts: u32,
    /// Fixed wait between two failed attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, Duration::from_secs(config.delay_secs))
    }
}

/// Connect to `endpoint`, retrying failed attempts
///
/// `attempt` performs one connection attempt. The first success is
/// returned immediately; once `policy.max_attempts` attempts have failed the
/// last error is wrapped in [`Error::ConnectionFailed`].
pub async fn connect_with_retry<F, Fut, S>(
    endpoint: &str,
    policy: RetryPolicy,
    mut attempt: F,
) -> Result<S>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<S>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut last_error = None;

    for n in 1..=max_attempts {
        match attempt().await {
            Ok(stream) => {
                tracing::debug!(endpoint, attempt = n, "Connected to service");
                return Ok(stream);
            }
            Err(e) => {
                tracing::debug!(endpoint, attempt = n, error = %e, "Service not reachable yet");
                last_error = Some(e);
            }
        }

        if n < max_attempts {
            tokio::time::sleep(policy.delay).await;
        }
    }

    let source = last_error
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no connection attempt made"));
    Err(Error::connection_failed(endpoint, max_attempts, source))
}
