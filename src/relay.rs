//! Relay engine
//!
//! Connects to the collection service and copies everything it sends to the
//! output sink, byte for byte. One read, then a full drain of that chunk to
//! the sink, then the next read; nothing runs concurrently.

use std::future::Future;
use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::common::config::Config;
use crate::common::{paths, Error, Result};
use crate::ipc::{connect_with_retry, Channel, RetryPolicy};

/// Everything one relay session needs to know
#[derive(Debug, Clone)]
pub struct RelaySettings {
    /// Endpoint name, used for connecting and in diagnostics
    pub endpoint: String,
    /// Connection retry bounds
    pub retry: RetryPolicy,
    /// Receive deadline; `None` waits forever
    pub inactivity_timeout: Option<Duration>,
    /// Transfer buffer capacity in bytes
    pub buffer_size: usize,
}

impl RelaySettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            endpoint: paths::socket_name(&config.endpoint.socket_dir, &config.endpoint.name),
            retry: RetryPolicy::from(&config.retry),
            inactivity_timeout: Some(config.transfer.inactivity_timeout()),
            buffer_size: config.transfer.buffer_size,
        }
    }
}

/// What a completed relay transferred
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaySummary {
    /// Total bytes written to the sink
    pub bytes: u64,
    /// Number of non-empty reads
    pub chunks: u64,
}

/// Run a complete relay session
///
/// Polls `connect` until the service accepts, arms the inactivity deadline
/// and streams into `sink` until the service closes the connection. The
/// channel is dropped, and therefore closed, before this returns on every
/// path.
pub async fn run_relay<F, Fut, S, W>(
    settings: &RelaySettings,
    connect: F,
    sink: &mut W,
) -> Result<RelaySummary>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<S>>,
    S: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let stream = connect_with_retry(&settings.endpoint, settings.retry, connect).await?;
    let mut channel = Channel::new(stream);

    if let Err(e) = channel.set_recv_timeout(settings.inactivity_timeout) {
        let err = Error::TimeoutConfigFailed(e);
        tracing::warn!("{err}");
    }

    let summary = relay(&mut channel, sink, settings.buffer_size).await?;
    tracing::debug!(
        endpoint = %settings.endpoint,
        bytes = summary.bytes,
        chunks = summary.chunks,
        "Service closed the connection"
    );
    Ok(summary)
}

/// Copy bytes from `channel` to `sink` until end of stream
///
/// Each chunk is completely written and flushed before the next read. A
/// failed read or write ends the relay immediately.
pub async fn relay<S, W>(
    channel: &mut Channel<S>,
    sink: &mut W,
    buffer_size: usize,
) -> Result<RelaySummary>
where
    S: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut summary = RelaySummary::default();

    loop {
        let read = recv_chunk(channel, &mut buffer).await?;
        if read == 0 {
            break;
        }

        drain_chunk(sink, &buffer[..read]).await?;
        summary.bytes += read as u64;
        summary.chunks += 1;
        tracing::trace!(read, total = summary.bytes, "Relayed chunk");
    }

    Ok(summary)
}

/// One receive, retried only when interrupted
async fn recv_chunk<S>(channel: &mut Channel<S>, buffer: &mut [u8]) -> Result<usize>
where
    S: AsyncRead + Unpin,
{
    loop {
        match channel.recv(buffer).await {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(classify_read_error(e)),
        }
    }
}

/// Map a failed receive to a transfer error
///
/// A receive that gave up waiting surfaces as `TimedOut` from the deadline
/// or `WouldBlock` from a socket-level receive timeout; both mean the
/// service went quiet.
pub fn classify_read_error(error: io::Error) -> Error {
    match error.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => Error::TransferTimedOut(error),
        _ => Error::TransferReadFailed(error),
    }
}

/// Write all of `chunk` to `sink`, advancing an offset over partial writes
///
/// A write that accepts zero bytes is retried without limit. The sink is
/// flushed before returning: buffered sinks such as tokio's stdout only
/// report a failed write on a later call, and unflushed bytes are lost if
/// the relay fails afterwards.
pub async fn drain_chunk<W>(sink: &mut W, chunk: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut offset = 0;

    while offset < chunk.len() {
        match sink.write(&chunk[offset..]).await {
            Ok(0) => {
                tracing::trace!(pending = chunk.len() - offset, "Sink accepted no bytes");
                tokio::task::yield_now().await;
            }
            Ok(n) => offset += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::write_failed(chunk.len(), chunk.len() - offset, e)),
        }
    }

    loop {
        match sink.flush().await {
            Ok(()) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            // Nothing of the chunk is known to have reached the sink
            Err(e) => return Err(Error::write_failed(chunk.len(), chunk.len(), e)),
        }
    }
}
