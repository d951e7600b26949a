//! Incremental output retrieval for operational commands.
//!
//! Each `GET /rest/op/{pid}` returns only the output produced since the
//! previous poll. The server answers `410 Gone` once the output is
//! exhausted; that status ends the stream and is never reported as an error.
//!
//! Polling is unbounded: the stream keeps asking until the server says it is
//! done. Each individual poll is bounded by the client's request timeout, and
//! an optional poll interval spaces the requests out.

use std::fmt;
use std::time::Instant;

use bytes::Bytes;
use futures_core::Stream;
use log::{debug, trace};

use crate::client::{Client, OP_ROOT};
use crate::error::{Error, Result};
use crate::transport::{Method, StatusCode, Transport, encode_segment};

/// Real-time output handle for a single operational command.
///
/// Created by [`Command::output_stream`](super::Command::output_stream).
/// Call [`next_chunk`](Self::next_chunk) in a loop to receive output as it
/// arrives.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example(client: &vyrest::Client) -> Result<(), vyrest::Error> {
/// let command = client.start_command(&["show", "log", "tail"]).await?;
/// let mut stream = command.output_stream();
/// while let Some(chunk) = stream.next_chunk().await? {
///     print!("{}", String::from_utf8_lossy(&chunk));
/// }
/// # Ok(())
/// # }
/// ```
pub struct OutputStream<'a, T> {
    client: &'a Client<T>,
    pid: String,
    path: String,
    finished: bool,
    /// Set after a poll returned a chunk; the next poll waits `poll_interval`.
    pause: bool,
    polls: usize,
    received: usize,
    start: Instant,
}

impl<'a, T: Transport> OutputStream<'a, T> {
    pub(crate) fn new(client: &'a Client<T>, pid: String) -> Self {
        let path = format!("{}/{}", OP_ROOT, encode_segment(&pid));
        Self {
            client,
            pid,
            path,
            finished: false,
            pause: false,
            polls: 0,
            received: 0,
            start: Instant::now(),
        }
    }

    /// Poll for the next chunk of output, or `None` once the command is done.
    ///
    /// A chunk may be empty when the command produced nothing since the last
    /// poll. After `None` has been returned no further request is made.
    ///
    /// A failed poll is returned as is; the stream stays open and the next
    /// call polls again without waiting for the poll interval.
    pub async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        if self.finished {
            return Ok(None);
        }

        if self.pause {
            if let Some(interval) = self.client.poll_interval() {
                tokio::time::sleep(interval).await;
            }
        }
        self.pause = false;
        self.polls += 1;

        match self.client.request(Method::GET, &self.path).await {
            Ok(response) => {
                self.pause = true;
                self.received += response.body.len();
                trace!(
                    "process {}: poll {} returned {} bytes",
                    self.pid,
                    self.polls,
                    response.body.len()
                );
                Ok(Some(response.body))
            }
            Err(Error::Status(e)) if e.status() == StatusCode::GONE => {
                self.finished = true;
                debug!(
                    "process {}: output complete after {} polls, {} bytes in {:?}",
                    self.pid,
                    self.polls,
                    self.received,
                    self.start.elapsed()
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Adapt into a [`Stream`] of chunks.
    ///
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<Bytes>> {
        futures_util::stream::try_unfold(self, |mut stream| async move {
            let chunk = stream.next_chunk().await?;
            Ok::<_, Error>(chunk.map(|chunk| (chunk, stream)))
        })
    }

    /// Whether the server has reported the output as exhausted.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The job id being polled.
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Number of polls issued so far, including the terminal one.
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl<T> fmt::Debug for OutputStream<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream")
            .field("pid", &self.pid)
            .field("finished", &self.finished)
            .field("polls", &self.polls)
            .field("received", &self.received)
            .finish_non_exhaustive()
    }
}

impl<T> Drop for OutputStream<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            debug!(
                "output stream for process {} dropped before completion",
                self.pid
            );
        }
    }
}
