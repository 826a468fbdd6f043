//
// Copyright 2017-2026 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Async line input over a telnet stream
//!
//! [`TelnetInputProcessor`] owns a stream and the [`LineCodec`] stack. All
//! progress lives in the processor, so a [`read_line`] future can be dropped
//! at any await point, for example when a timer wins a `select!`, and the
//! next call resumes with no input or echo lost.
//!
//! [`read_line`]: TelnetInputProcessor::read_line

use crate::Result;
use bytes::{Buf, BytesMut};
use std::io;
use std::time::Duration;
use storyhost_telnetcodec::NEGOTIATION_PREAMBLE;
use storyhost_terminal::{AnsiCodec, LineCodec, TelnetCodec};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{Decoder, Encoder};
use tracing::{instrument, trace};

const READ_CHUNK: usize = 1024;

/// Reads edited lines from a telnet client and writes text back to it
#[derive(Debug)]
pub struct TelnetInputProcessor<S> {
    stream: S,
    codec: LineCodec<AnsiCodec<TelnetCodec>>,
    read_buf: BytesMut,
    write_buf: BytesMut,
    ready: Option<String>,
    eof: bool,
}

impl<S> TelnetInputProcessor<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap a stream, echoing keystrokes when `echo` is set
    pub fn new(stream: S, echo: bool) -> Self {
        Self {
            stream,
            codec: LineCodec::telnet().with_echo(echo),
            read_buf: BytesMut::with_capacity(READ_CHUNK),
            write_buf: BytesMut::new(),
            ready: None,
            eof: false,
        }
    }

    /// Announce the server's telnet options, then give the client `delay` to answer
    #[instrument(level = "debug", skip(self))]
    pub async fn negotiate(&mut self, delay: Duration) -> Result<()> {
        for frame in NEGOTIATION_PREAMBLE {
            self.codec.queue_frame(frame)?;
        }
        self.flush().await?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }

    /// Read the next submitted line
    ///
    /// Returns `Ok(None)` once the peer has closed the stream and nothing is
    /// left to submit, and `Ok(Some(""))` for an empty line.
    ///
    /// This method is cancel safe.
    pub async fn read_line(&mut self) -> Result<Option<String>> {
        loop {
            if self.ready.is_none() {
                self.ready = if self.eof {
                    self.codec.decode_eof(&mut self.read_buf)?
                } else {
                    self.codec.decode(&mut self.read_buf)?
                };
            }

            self.flush().await?;

            if let Some(line) = self.ready.take() {
                trace!(length = line.len(), "line submitted");
                return Ok(Some(line));
            }
            if self.eof {
                return Ok(None);
            }

            self.read_buf.reserve(READ_CHUNK);
            if self.stream.read_buf(&mut self.read_buf).await? == 0 {
                trace!("peer closed the stream");
                self.eof = true;
            }
        }
    }

    /// Write text with bare `\n` widened to `\r\n`
    pub async fn write_text(&mut self, text: &str) -> Result<()> {
        self.queue_echo();
        self.codec.encode(text, &mut self.write_buf)?;
        self.flush().await
    }

    /// Write text followed by `\r\n`
    pub async fn write_line(&mut self, text: &str) -> Result<()> {
        self.queue_echo();
        self.codec.encode(text, &mut self.write_buf)?;
        self.write_buf.extend_from_slice(b"\r\n");
        self.flush().await
    }

    /// Write pending echo, negotiation replies and text to the stream
    ///
    /// Bytes leave the buffer only once the stream accepted them, so a
    /// cancelled flush resumes where it stopped.
    pub async fn flush(&mut self) -> Result<()> {
        self.queue_echo();
        while self.write_buf.has_remaining() {
            if self.stream.write_buf(&mut self.write_buf).await? == 0 {
                return Err(io::Error::from(io::ErrorKind::WriteZero).into());
            }
        }
        self.stream.flush().await?;
        Ok(())
    }

    fn queue_echo(&mut self) {
        if !self.codec.output().is_empty() {
            self.write_buf.unsplit(self.codec.take_output());
        }
    }

    /// Shut down the write half of the stream
    pub async fn shutdown(&mut self) -> Result<()> {
        self.stream.shutdown().await?;
        Ok(())
    }
}
