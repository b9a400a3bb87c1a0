//! Cross-platform IPC transport layer
//!
//! Abstracts Unix domain sockets (Unix/macOS/Android) and named pipes
//! (Windows) using the interprocess crate.

use std::io;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};

// Platform-specific imports and type aliases
#[cfg(unix)]
pub mod platform {
    pub use interprocess::local_socket::tokio::{prelude::*, Stream};
    pub use interprocess::local_socket::GenericFilePath;
}

#[cfg(windows)]
pub mod platform {
    pub use interprocess::local_socket::tokio::{prelude::*, Stream};
    pub use interprocess::local_socket::GenericNamespaced;
}

use platform::*;

/// Re-export Stream for use in other modules
pub use platform::Stream;

/// Connect to the service endpoint once
pub async fn connect(name: &str) -> io::Result<Stream> {
    #[cfg(unix)]
    let stream = {
        let name = name.to_fs_name::<GenericFilePath>()?;
        Stream::connect(name).await?
    };

    #[cfg(windows)]
    let stream = {
        let name = name.to_ns_name::<GenericNamespaced>()?;
        Stream::connect(name).await?
    };

    Ok(stream)
}

/// An open connection to the service with an optional receive deadline
///
/// The deadline bounds each individual receive, so it fires only when no
/// data at all arrives within the window.
#[derive(Debug)]
pub struct Channel<S> {
    stream: S,
    recv_timeout: Option<Duration>,
}

impl<S> Channel<S> {
    /// Wrap a connected stream; no deadline is set initially
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            recv_timeout: None,
        }
    }

    /// Set the receive deadline
    ///
    /// A zero duration is rejected with `InvalidInput`, matching
    /// `UnixStream::set_read_timeout`. `None` waits forever.
    pub fn set_recv_timeout(&mut self, timeout: Option<Duration>) -> io::Result<()> {
        if timeout == Some(Duration::ZERO) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "cannot set a 0 duration timeout",
            ));
        }
        self.recv_timeout = timeout;
        Ok(())
    }

    /// Currently configured receive deadline
    pub fn recv_timeout(&self) -> Option<Duration> {
        self.recv_timeout
    }

    /// Borrow the underlying stream
    pub fn get_ref(&self) -> &S {
        &self.stream
    }
}

impl<S: AsyncRead + Unpin> Channel<S> {
    /// Receive up to `buf.len()` bytes
    ///
    /// Returns `Ok(0)` at end of stream. An expired deadline is reported as
    /// `io::ErrorKind::TimedOut`.
    pub async fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.recv_timeout {
            Some(limit) => match tokio::time::timeout(limit, self.stream.read(buf)).await {
                Ok(result) => result,
                Err(_) => Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    format!("no data received for {limit:?}"),
                )),
            },
            None => self.stream.read(buf).await,
        }
    }
}
