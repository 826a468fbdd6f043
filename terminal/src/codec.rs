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

use super::{GraphemeBuffer, TerminalError, TerminalResult, Utf8Decoder, echo};
use storyhost_ansicodec::{AnsiCodec, AnsiKey, AnsiSequence, TelnetCodec, TelnetFrame};
use tokio_util::bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder};
use tracing::trace;

const NUL: u8 = 0x00;
const BACKSPACE: u8 = 0x08;
const LINE_FEED: u8 = 0x0A;
const CARRIAGE_RETURN: u8 = 0x0D;
const DELETE: u8 = 0x7F;

/// Wraps a codec that decodes [`AnsiSequence`] and turns it into edited lines.
///
/// Decoding yields one `String` per submitted line. Everything the client must
/// see as a result, keystroke echo and negotiation replies alike, is collected
/// in an output buffer that the owner drains with [`LineCodec::take_output`]
/// and writes back to the peer.
///
/// `CR`, `LF` and `CR LF` each end exactly one line. A `NUL` is dropped.
#[derive(Debug)]
pub struct LineCodec<I> {
    buffer: GraphemeBuffer,
    utf8: Utf8Decoder,
    output: BytesMut,
    pending_cr: bool,
    echo: bool,
    codec: I,
}

impl LineCodec<AnsiCodec<TelnetCodec>> {
    /// Creates the full stack: telnet, then ANSI, then line editing.
    pub fn telnet() -> Self {
        LineCodec::new(AnsiCodec::new(TelnetCodec::new()))
    }
}

impl Default for LineCodec<AnsiCodec<TelnetCodec>> {
    fn default() -> Self {
        LineCodec::telnet()
    }
}

impl<I> LineCodec<I> {
    /// Creates a line codec wrapping the given inner codec, with echo on.
    pub fn new(codec: I) -> Self {
        LineCodec {
            buffer: GraphemeBuffer::new(),
            utf8: Utf8Decoder::new(),
            output: BytesMut::new(),
            pending_cr: false,
            echo: true,
            codec,
        }
    }

    /// Turns keystroke echo on or off.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Returns whether keystrokes are echoed.
    pub fn echo(&self) -> bool {
        self.echo
    }

    /// Returns a reference to the inner codec.
    pub fn codec(&self) -> &I {
        &self.codec
    }

    /// Returns a mutable reference to the inner codec.
    pub fn codec_mut(&mut self) -> &mut I {
        &mut self.codec
    }

    /// Returns the line being edited.
    pub fn buffer(&self) -> &GraphemeBuffer {
        &self.buffer
    }

    /// Bytes waiting to be written to the peer.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Removes and returns the bytes waiting to be written to the peer.
    pub fn take_output(&mut self) -> BytesMut {
        self.output.split()
    }

    fn complete_line(&mut self) -> String {
        if self.echo {
            echo::line_end(&mut self.output);
        }
        self.utf8.reset();
        self.buffer.try_drain().unwrap_or_default()
    }

    fn data(&mut self, byte: u8) -> Option<String> {
        // CR NUL is a bare carriage return, the LF rule still applies after it
        if byte == NUL {
            return None;
        }
        let after_cr = std::mem::take(&mut self.pending_cr);
        match byte {
            CARRIAGE_RETURN => {
                self.pending_cr = true;
                Some(self.complete_line())
            }
            LINE_FEED if after_cr => None,
            LINE_FEED => Some(self.complete_line()),
            BACKSPACE | DELETE => {
                self.backspace();
                None
            }
            0x01..=0x1F => {
                trace!(byte, "ignoring control character");
                None
            }
            _ => {
                for ch in self.utf8.push(byte) {
                    self.insert(ch);
                }
                None
            }
        }
    }

    fn insert(&mut self, ch: char) {
        let (text_after, width_after) = if self.echo && self.buffer.is_cursor_inside() {
            (
                self.buffer.text_after_cursor(),
                self.buffer.display_width_after_cursor(),
            )
        } else {
            (String::new(), 0)
        };
        self.buffer.append(ch);
        if self.echo {
            echo::insert(&mut self.output, ch, &text_after, width_after);
        }
    }

    fn backspace(&mut self) {
        let Some(width) = self.buffer.try_backspace() else {
            return;
        };
        if self.echo {
            let text_after = self.buffer.text_after_cursor();
            let width_after = self.buffer.display_width_after_cursor();
            echo::backspace(&mut self.output, width, &text_after, width_after);
        }
    }

    fn delete(&mut self) {
        let Some(width) = self.buffer.try_delete() else {
            return;
        };
        if self.echo {
            let text_after = self.buffer.text_after_cursor();
            let width_after = self.buffer.display_width_after_cursor();
            echo::delete(&mut self.output, width, &text_after, width_after);
        }
    }

    fn key(&mut self, key: AnsiKey) {
        self.pending_cr = false;
        let output = &mut self.output;
        // Up and Down have no history to walk, they jump to the ends of the line.
        match key {
            AnsiKey::CursorBack => {
                if let Some(width) = self.buffer.move_cursor_left().filter(|_| self.echo) {
                    echo::cursor_back(output, width);
                }
            }
            AnsiKey::CursorForward => {
                if let Some(width) = self.buffer.move_cursor_right().filter(|_| self.echo) {
                    echo::cursor_forward(output, width);
                }
            }
            AnsiKey::CursorUp | AnsiKey::Home => {
                let width = self.buffer.move_cursor_to_start();
                if self.echo {
                    echo::cursor_back(output, width);
                }
            }
            AnsiKey::CursorDown | AnsiKey::End => {
                let width = self.buffer.move_cursor_to_end();
                if self.echo {
                    echo::cursor_forward(output, width);
                }
            }
            AnsiKey::Delete => self.delete(),
        }
    }
}

impl<I> LineCodec<I>
where
    I: Encoder<TelnetFrame>,
    TerminalError: From<I::Error>,
{
    /// Queues a telnet frame behind any pending echo.
    pub fn queue_frame(&mut self, frame: TelnetFrame) -> TerminalResult<()> {
        self.codec.encode(frame, &mut self.output)?;
        Ok(())
    }

    fn apply(&mut self, item: AnsiSequence) -> TerminalResult<Option<String>> {
        match item {
            AnsiSequence::Data(byte) => Ok(self.data(byte)),
            AnsiSequence::Key(key) => {
                self.key(key);
                Ok(None)
            }
            AnsiSequence::Negotiate {
                reply: Some(reply), ..
            } => {
                self.queue_frame(reply)?;
                Ok(None)
            }
            AnsiSequence::Negotiate { reply: None, .. } => Ok(None),
        }
    }
}

impl<I> Decoder for LineCodec<I>
where
    I: Decoder<Item = AnsiSequence> + Encoder<TelnetFrame>,
    TerminalError: From<<I as Decoder>::Error> + From<<I as Encoder<TelnetFrame>>::Error>,
{
    type Item = String;
    type Error = TerminalError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        while let Some(item) = self.codec.decode(src)? {
            if let Some(line) = self.apply(item)? {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// At end of stream an unterminated line is returned as is. `None` means
    /// nothing was typed, so the caller can tell a closed peer from an empty line.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        self.utf8.reset();
        self.pending_cr = false;
        Ok(self.buffer.try_drain())
    }
}

impl<I> Encoder<&str> for LineCodec<I> {
    type Error = TerminalError;

    /// Encodes text for the wire with bare `\n` widened to `\r\n`.
    fn encode(&mut self, item: &str, dst: &mut BytesMut) -> Result<(), Self::Error> {
        echo::normalize_newlines(dst, item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(codec: &mut LineCodec<AnsiCodec<TelnetCodec>>, bytes: &[u8]) -> Vec<String> {
        let mut src = BytesMut::from(bytes);
        let mut lines = Vec::new();
        while let Some(line) = codec.decode(&mut src).unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn crlf_is_one_terminator() {
        let mut codec = LineCodec::telnet();
        assert_eq!(feed(&mut codec, b"look\r\nnorth\r\n"), vec!["look", "north"]);
    }

    #[test]
    fn bare_cr_and_bare_lf_both_end_lines() {
        let mut codec = LineCodec::telnet();
        assert_eq!(feed(&mut codec, b"a\rb\nc\r\0d\n"), vec!["a", "b", "c", "d"]);
        assert_eq!(feed(&mut codec, b"e\r\0\nf\n"), vec!["e", "f"]);
    }

    #[test]
    fn lf_split_from_cr_is_still_swallowed() {
        let mut codec = LineCodec::telnet();
        assert_eq!(feed(&mut codec, b"a\r"), vec!["a"]);
        assert!(feed(&mut codec, b"\n").is_empty());
        assert_eq!(feed(&mut codec, b"\n"), vec![""]);
    }

    #[test]
    fn empty_line_is_empty_string() {
        let mut codec = LineCodec::telnet();
        assert_eq!(feed(&mut codec, b"\r\n"), vec![""]);
        assert_eq!(codec.take_output().as_ref(), b"\r\n");
    }

    #[test]
    fn eof_returns_partial_then_none() {
        let mut codec = LineCodec::telnet();
        let mut src = BytesMut::from(&b"par"[..]);
        assert_eq!(codec.decode_eof(&mut src).unwrap().as_deref(), Some("par"));
        assert_eq!(codec.decode_eof(&mut src).unwrap(), None);
    }

    #[test]
    fn negotiation_reply_is_queued_not_decoded() {
        let mut codec = LineCodec::telnet().with_echo(false);
        assert_eq!(feed(&mut codec, b"h\xff\xfd\x99i\r"), vec!["hi"]);
        assert_eq!(codec.take_output().as_ref(), b"\xff\xfc\x99");
    }

    #[test]
    fn echo_disabled_writes_nothing() {
        let mut codec = LineCodec::telnet().with_echo(false);
        assert_eq!(feed(&mut codec, b"ab\x08\x1b[Dc\r"), vec!["ca"]);
        assert!(codec.output().is_empty());
    }

    #[test]
    fn encoded_text_uses_crlf() {
        let mut codec = LineCodec::telnet();
        let mut dst = BytesMut::new();
        codec.encode("one\ntwo\n", &mut dst).unwrap();
        assert_eq!(dst.as_ref(), b"one\r\ntwo\r\n");
    }
}
