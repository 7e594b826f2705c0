//! Newline-delimited JSON over any async byte stream (TCP in the server).

use std::io;

use kbase_core::constants::MAX_FRAME_BYTES;
use kbase_core::errors::SessionError;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::debug;

use super::{Transport, TransportEvent};

/// One frame per line in each direction. Inbound lines longer than the
/// frame limit are skipped up to their newline and reported as rejected.
pub struct LineTransport<R, W> {
    reader: BufReader<R>,
    /// Bytes of the line being assembled.
    pending: Vec<u8>,
    /// Set while skipping the rest of an oversized line.
    discarding: bool,
    max_frame_bytes: usize,
    writer: W,
    closed: bool,
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_max_frame_bytes(reader, writer, MAX_FRAME_BYTES)
    }

    pub fn with_max_frame_bytes(reader: R, writer: W, max_frame_bytes: usize) -> Self {
        Self {
            reader: BufReader::new(reader),
            pending: Vec::new(),
            discarding: false,
            max_frame_bytes,
            writer,
            closed: false,
        }
    }

    /// Next line, oversized-line rejection, or end of stream. Partial input
    /// is kept in `self` between calls, so dropping the future loses nothing.
    async fn read_line(&mut self) -> io::Result<TransportEvent> {
        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                // End of stream; an unterminated last line still counts.
                if std::mem::take(&mut self.discarding) {
                    return Ok(self.oversized());
                }
                if self.pending.is_empty() {
                    return Ok(TransportEvent::Disconnected);
                }
                return Ok(self.take_line());
            }

            let (len, complete) = match available.iter().position(|b| *b == b'\n') {
                Some(pos) => (pos, true),
                None => (available.len(), false),
            };
            if !self.discarding {
                self.pending.extend_from_slice(&available[..len]);
                if self.pending.len() > self.max_frame_bytes {
                    self.pending = Vec::new();
                    self.discarding = true;
                }
            }
            self.reader.consume(len + usize::from(complete));

            if complete {
                if std::mem::take(&mut self.discarding) {
                    return Ok(self.oversized());
                }
                return Ok(self.take_line());
            }
        }
    }

    fn take_line(&mut self) -> TransportEvent {
        let mut bytes = std::mem::take(&mut self.pending);
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        match String::from_utf8(bytes) {
            Ok(line) => TransportEvent::Message(line),
            Err(_) => TransportEvent::Rejected(SessionError::MalformedRequest {
                reason: "frame is not valid UTF-8".into(),
            }),
        }
    }

    fn oversized(&self) -> TransportEvent {
        debug!(limit = self.max_frame_bytes, "skipped oversized inbound line");
        TransportEvent::Rejected(SessionError::MalformedRequest {
            reason: format!("frame exceeds {} bytes", self.max_frame_bytes),
        })
    }

    async fn write_frame(&mut self, frame: &str) -> io::Result<()> {
        self.writer.write_all(frame.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await
    }
}

impl LineTransport<OwnedReadHalf, OwnedWriteHalf> {
    pub fn from_tcp(stream: TcpStream) -> Self {
        let (reader, writer) = stream.into_split();
        Self::new(reader, writer)
    }
}

impl<R, W> Transport for LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: AsyncWrite + Unpin + Send + 'static,
{
    async fn receive(&mut self) -> TransportEvent {
        loop {
            match self.read_line().await {
                Ok(TransportEvent::Message(line)) if line.trim().is_empty() => continue,
                Ok(event) => return event,
                Err(e) => {
                    debug!(error = %e, "read failed, treating as disconnect");
                    return TransportEvent::Disconnected;
                }
            }
        }
    }

    async fn send(&mut self, frame: String) -> Result<(), SessionError> {
        if self.closed {
            return Err(SessionError::TransportClosed);
        }
        if let Err(e) = self.write_frame(&frame).await {
            debug!(error = %e, "write failed");
            self.closed = true;
            return Err(SessionError::TransportClosed);
        }
        Ok(())
    }

    async fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.writer.shutdown().await;
        }
    }
}
