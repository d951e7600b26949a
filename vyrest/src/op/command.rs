//! Handle to a running operational command.

use std::fmt;

use bytes::BytesMut;
use log::debug;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::stream::OutputStream;
use crate::client::{Client, OP_ROOT};
use crate::error::Result;
use crate::transport::{Method, Transport, encode_segment};

/// Reference to a job on the device.
///
/// Carries only the job id. Output retrieval and kill consume the handle:
/// each poll consumes output on the server, so one handle must never poll
/// concurrently or after the output is exhausted.
pub struct Command<'a, T> {
    client: &'a Client<T>,
    pid: String,
}

impl<T> fmt::Debug for Command<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Transport> Command<'a, T> {
    pub(crate) fn new(client: &'a Client<T>, pid: impl Into<String>) -> Self {
        Self {
            client,
            pid: pid.into(),
        }
    }

    /// The server-assigned job id.
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Poll the output chunk by chunk.
    pub fn output_stream(self) -> OutputStream<'a, T> {
        OutputStream::new(self.client, self.pid)
    }

    /// Collect the complete output of the command.
    ///
    /// Polls until the server reports the output exhausted. On failure the
    /// output gathered so far is discarded.
    pub async fn output(self) -> Result<String> {
        let mut stream = self.output_stream();
        let mut buffer = BytesMut::new();
        while let Some(chunk) = stream.next_chunk().await? {
            buffer.extend_from_slice(&chunk);
        }
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    /// Write the output to `sink` as it arrives.
    ///
    /// Each chunk is written and flushed before the next poll. Returns the
    /// number of bytes written.
    pub async fn stream_output<W>(self, sink: &mut W) -> Result<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut stream = self.output_stream();
        let mut written = 0u64;
        while let Some(chunk) = stream.next_chunk().await? {
            if chunk.is_empty() {
                continue;
            }
            sink.write_all(&chunk).await?;
            sink.flush().await?;
            written += chunk.len() as u64;
        }
        Ok(written)
    }

    /// Kill the command on the device.
    pub async fn kill(self) -> Result<()> {
        debug!("killing process {}", self.pid);
        self.client
            .request(
                Method::DELETE,
                &format!("{}/{}", OP_ROOT, encode_segment(&self.pid)),
            )
            .await?;
        Ok(())
    }
}
